mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Appointment, AppointmentSummary, Cpf, Doctor, NewAppointment, NewUser, Specialty, StoreError,
    User, UserChanges,
};

/// Name of the unique constraint on `usuarios.cpf`.
pub const CPF_UNIQUE_CONSTRAINT: &str = "usuarios_cpf_key";
/// Name of the unique constraint on `consultas (medico_id, data_hora)`.
pub const DOCTOR_SLOT_UNIQUE_CONSTRAINT: &str = "consultas_medico_data_hora_key";

/// Row-level access to users, reference data and appointments.
///
/// Lookups of a single row return `Ok(None)` when it is absent; mutations of a
/// single row return `Ok(None)`/`Ok(false)` when nothing matched the id.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert_user(&self, user: &NewUser, password_hash: &str) -> Result<User, StoreError>;

    async fn find_user(&self, id: i32) -> Result<Option<User>, StoreError>;

    async fn find_user_by_cpf(&self, cpf: &Cpf) -> Result<Option<User>, StoreError>;

    async fn update_user(
        &self,
        id: i32,
        changes: &UserChanges,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Also removes the user's appointments.
    async fn delete_user(&self, id: i32) -> Result<bool, StoreError>;

    async fn list_specialties(&self) -> Result<Vec<Specialty>, StoreError>;

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError>;

    async fn list_doctors_by_specialty(&self, specialty_id: i32)
        -> Result<Vec<Doctor>, StoreError>;

    async fn insert_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, StoreError>;

    async fn find_appointment(&self, id: i32) -> Result<Option<Appointment>, StoreError>;

    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError>;

    async fn list_appointments_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<AppointmentSummary>, StoreError>;

    async fn reschedule_appointment(
        &self,
        id: i32,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError>;

    async fn delete_appointment(&self, id: i32) -> Result<bool, StoreError>;
}
