use anyhow::Context;

use crate::{
    authentication::{hash_password, validate_credentials, AuthError},
    domain::{BookingError, Credentials, NewUser, StoreError, User, UserChanges},
    store::{BookingStore, CPF_UNIQUE_CONSTRAINT},
};

const USER_NOT_FOUND: &str = "Usuário não encontrado";

fn user_store_error(e: StoreError, context: &'static str) -> BookingError {
    match e {
        StoreError::UniqueViolation(constraint) if constraint == CPF_UNIQUE_CONSTRAINT => {
            BookingError::Conflict("CPF já cadastrado".to_string())
        }
        other => BookingError::Store(anyhow::Error::new(other).context(context)),
    }
}

#[tracing::instrument(name = "Create user", skip(store, new_user))]
pub async fn create_user(store: &dyn BookingStore, new_user: NewUser) -> Result<User, BookingError> {
    let password_hash = hash_password(new_user.password.clone()).await?;
    store
        .insert_user(&new_user, &password_hash)
        .await
        .map_err(|e| user_store_error(e, "Failed to insert a new user."))
}

#[tracing::instrument(name = "Get user", skip(store))]
pub async fn get_user(store: &dyn BookingStore, id: i32) -> Result<User, BookingError> {
    store
        .find_user(id)
        .await
        .context("Failed to fetch user by id.")?
        .ok_or_else(|| BookingError::NotFound(USER_NOT_FOUND.to_string()))
}

#[tracing::instrument(name = "Login", skip(store, credentials))]
pub async fn login(store: &dyn BookingStore, credentials: Credentials) -> Result<User, BookingError> {
    validate_credentials(credentials, store)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials(_) => BookingError::Authentication,
            AuthError::UnexpectedError(e) => BookingError::Store(e),
        })
}

#[tracing::instrument(name = "Update user", skip(store, changes))]
pub async fn update_user(
    store: &dyn BookingStore,
    id: i32,
    changes: UserChanges,
) -> Result<User, BookingError> {
    let password_hash = hash_password(changes.password.clone()).await?;
    store
        .update_user(id, &changes, &password_hash)
        .await
        .map_err(|e| user_store_error(e, "Failed to update user."))?
        .ok_or_else(|| BookingError::NotFound(USER_NOT_FOUND.to_string()))
}

#[tracing::instrument(name = "Delete user", skip(store))]
pub async fn delete_user(store: &dyn BookingStore, id: i32) -> Result<(), BookingError> {
    let deleted = store
        .delete_user(id)
        .await
        .context("Failed to delete user.")?;
    if !deleted {
        return Err(BookingError::NotFound(USER_NOT_FOUND.to_string()));
    }
    Ok(())
}
