use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Appointment {
    pub id: i32,
    #[serde(rename = "usuario_id")]
    #[sqlx(rename = "usuario_id")]
    pub user_id: i32,
    #[serde(rename = "medico_id")]
    #[sqlx(rename = "medico_id")]
    pub doctor_id: i32,
    #[serde(rename = "data_hora")]
    #[sqlx(rename = "data_hora")]
    pub scheduled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
pub struct NewAppointment {
    pub user_id: i32,
    pub doctor_id: i32,
    pub scheduled_at: DateTime<Utc>,
}

/// Postgres keeps `TIMESTAMPTZ` at microsecond precision; two instants that
/// differ below that are the same slot.
pub fn slot_instant(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(6)
}

/// An appointment as shown in a patient's history, joined with doctor and specialty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct AppointmentSummary {
    pub id: i32,
    #[serde(rename = "data_hora")]
    #[sqlx(rename = "data_hora")]
    pub scheduled_at: DateTime<Utc>,
    #[serde(rename = "medico")]
    #[sqlx(rename = "medico")]
    pub doctor_name: String,
    #[serde(rename = "especialidade")]
    #[sqlx(rename = "especialidade")]
    pub specialty_name: String,
}
