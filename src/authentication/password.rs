use anyhow::{Context, Error};
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};

use crate::{
    domain::{Credentials, Password, User},
    store::BookingStore,
    telemetry::spawn_blocking_with_tracing,
};

/// Verified against when the CPF is unknown, so both failure paths cost one argon2 run.
const FALLBACK_PASSWORD_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$\
gZiV/M1gPc22ElAH/Jh1Hw$\
CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials(#[source] anyhow::Error),

    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

#[tracing::instrument(name = "Validate credentials", skip(credentials, store))]
pub async fn validate_credentials(
    credentials: Credentials,
    store: &dyn BookingStore,
) -> Result<User, AuthError> {
    let mut user = None;
    let mut expected_password_hash = FALLBACK_PASSWORD_HASH.to_string();

    if let Some(stored_user) = store
        .find_user_by_cpf(&credentials.cpf)
        .await
        .context("Failed to perform a query to retrieve stored credentials.")?
    {
        expected_password_hash = stored_user.password_hash.clone();
        user = Some(stored_user);
    }

    spawn_blocking_with_tracing(move || {
        verify_password_hash(expected_password_hash, credentials.password)
    })
    .await
    .context("Failed to spawn blocking task.")??;

    user.ok_or_else(|| AuthError::InvalidCredentials(anyhow::anyhow!("Unknown CPF.")))
}

#[tracing::instrument(
    name = "Verify password hash",
    skip(expected_password_hash, password_candidate)
)]
fn verify_password_hash(
    expected_password_hash: String,
    password_candidate: Password,
) -> Result<(), AuthError> {
    let expected_password_hash = PasswordHash::new(&expected_password_hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse hash in PHC string format: {e}"))?;

    Argon2::default()
        .verify_password(
            password_candidate.expose().as_bytes(),
            &expected_password_hash,
        )
        .map_err(|e| AuthError::InvalidCredentials(anyhow::anyhow!("Invalid password: {e}")))
}

pub fn compute_password_hash(password: Password) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let params = Params::new(15000, 2, 1, None).map_err(Error::msg)?;
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose().as_bytes(), &salt)
        .map_err(Error::msg)?
        .to_string();

    Ok(password_hash)
}

/// Hashes on the blocking pool; argon2 is too slow for an async worker.
pub async fn hash_password(password: Password) -> Result<String, Error> {
    spawn_blocking_with_tracing(move || compute_password_hash(password))
        .await
        .context("Failed to spawn blocking task.")?
}
