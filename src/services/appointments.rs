use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::{
    domain::{
        slot_instant, Appointment, AppointmentSummary, BookingError, NewAppointment, StoreError,
    },
    store::{BookingStore, DOCTOR_SLOT_UNIQUE_CONSTRAINT},
};

const APPOINTMENT_NOT_FOUND: &str = "Consulta não encontrada";

fn appointment_store_error(e: StoreError, context: &'static str) -> BookingError {
    match e {
        StoreError::UniqueViolation(constraint) if constraint == DOCTOR_SLOT_UNIQUE_CONSTRAINT => {
            BookingError::Conflict("O médico já possui consulta neste horário".to_string())
        }
        StoreError::ForeignKeyViolation(_) => {
            BookingError::Validation("Usuário ou médico inexistente".to_string())
        }
        other => BookingError::Store(anyhow::Error::new(other).context(context)),
    }
}

/// Books a slot. A doctor holds at most one appointment per instant.
#[tracing::instrument(name = "Create appointment", skip(store))]
pub async fn create_appointment(
    store: &dyn BookingStore,
    appointment: NewAppointment,
) -> Result<Appointment, BookingError> {
    let appointment = NewAppointment {
        scheduled_at: slot_instant(appointment.scheduled_at),
        ..appointment
    };
    store
        .insert_appointment(&appointment)
        .await
        .map_err(|e| appointment_store_error(e, "Failed to insert a new appointment."))
}

#[tracing::instrument(name = "Get appointment", skip(store))]
pub async fn get_appointment(
    store: &dyn BookingStore,
    id: i32,
) -> Result<Appointment, BookingError> {
    store
        .find_appointment(id)
        .await
        .context("Failed to fetch appointment by id.")?
        .ok_or_else(|| BookingError::NotFound(APPOINTMENT_NOT_FOUND.to_string()))
}

#[tracing::instrument(name = "List appointments", skip(store))]
pub async fn list_appointments(store: &dyn BookingStore) -> Result<Vec<Appointment>, BookingError> {
    Ok(store
        .list_appointments()
        .await
        .context("Failed to list appointments.")?)
}

#[tracing::instrument(name = "List appointments by user", skip(store))]
pub async fn list_appointments_by_user(
    store: &dyn BookingStore,
    user_id: i32,
) -> Result<Vec<AppointmentSummary>, BookingError> {
    Ok(store
        .list_appointments_by_user(user_id)
        .await
        .context("Failed to list appointments by user.")?)
}

#[tracing::instrument(name = "Reschedule appointment", skip(store))]
pub async fn update_appointment(
    store: &dyn BookingStore,
    id: i32,
    scheduled_at: DateTime<Utc>,
) -> Result<Appointment, BookingError> {
    store
        .reschedule_appointment(id, slot_instant(scheduled_at))
        .await
        .map_err(|e| appointment_store_error(e, "Failed to reschedule appointment."))?
        .ok_or_else(|| BookingError::NotFound(APPOINTMENT_NOT_FOUND.to_string()))
}

/// Idempotent: removing an absent appointment succeeds.
#[tracing::instrument(name = "Delete appointment", skip(store))]
pub async fn delete_appointment(store: &dyn BookingStore, id: i32) -> Result<(), BookingError> {
    let deleted = store
        .delete_appointment(id)
        .await
        .context("Failed to delete appointment.")?;
    if !deleted {
        tracing::debug!(appointment_id = id, "appointment already absent");
    }
    Ok(())
}
