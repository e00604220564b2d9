use anyhow::Context;

use crate::{
    domain::{BookingError, Doctor, Specialty},
    store::BookingStore,
};

#[tracing::instrument(name = "List specialties", skip(store))]
pub async fn list_specialties(store: &dyn BookingStore) -> Result<Vec<Specialty>, BookingError> {
    Ok(store
        .list_specialties()
        .await
        .context("Failed to list specialties.")?)
}

#[tracing::instrument(name = "List doctors", skip(store))]
pub async fn list_doctors(store: &dyn BookingStore) -> Result<Vec<Doctor>, BookingError> {
    Ok(store.list_doctors().await.context("Failed to list doctors.")?)
}

/// An unknown specialty yields an empty list.
#[tracing::instrument(name = "List doctors by specialty", skip(store))]
pub async fn list_doctors_by_specialty(
    store: &dyn BookingStore,
    specialty_id: i32,
) -> Result<Vec<Doctor>, BookingError> {
    Ok(store
        .list_doctors_by_specialty(specialty_id)
        .await
        .context("Failed to list doctors by specialty.")?)
}
