use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::BookingStore;
use crate::domain::{
    Appointment, AppointmentSummary, Cpf, Doctor, NewAppointment, NewUser, Specialty, StoreError,
    User, UserChanges,
};

const USER_COLUMNS: &str = "id, nome, cpf, senha_hash, telefone, data_nascimento";
const APPOINTMENT_COLUMNS: &str = "id, usuario_id, medico_id, data_hora";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn insert_user(&self, user: &NewUser, password_hash: &str) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO usuarios (nome, cpf, senha_hash, telefone, data_nascimento)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.name.as_ref())
        .bind(user.cpf.as_ref())
        .bind(password_hash)
        .bind(user.phone.as_ref().map(AsRef::<str>::as_ref))
        .bind(user.birth_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM usuarios WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_user_by_cpf(&self, cpf: &Cpf) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM usuarios WHERE cpf = $1"
        ))
        .bind(cpf.as_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_user(
        &self,
        id: i32,
        changes: &UserChanges,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE usuarios
            SET nome = $1, cpf = $2, senha_hash = $3, telefone = $4
            WHERE id = $5
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(changes.name.as_ref())
        .bind(changes.cpf.as_ref())
        .bind(password_hash)
        .bind(changes.phone.as_ref().map(AsRef::<str>::as_ref))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_user(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_specialties(&self) -> Result<Vec<Specialty>, StoreError> {
        let rows = sqlx::query_as::<_, Specialty>(
            "SELECT id, nome FROM especialidades ORDER BY nome, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        let rows = sqlx::query_as::<_, Doctor>(
            "SELECT id, nome, especialidade_id, avatar_url FROM medicos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_doctors_by_specialty(
        &self,
        specialty_id: i32,
    ) -> Result<Vec<Doctor>, StoreError> {
        let rows = sqlx::query_as::<_, Doctor>(
            r#"
            SELECT id, nome, especialidade_id, avatar_url
            FROM medicos
            WHERE especialidade_id = $1
            ORDER BY id
            "#,
        )
        .bind(specialty_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, StoreError> {
        let row = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            INSERT INTO consultas (usuario_id, medico_id, data_hora)
            VALUES ($1, $2, $3)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(appointment.user_id)
        .bind(appointment.doctor_id)
        .bind(appointment.scheduled_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_appointment(&self, id: i32) -> Result<Option<Appointment>, StoreError> {
        let row = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM consultas WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        let rows = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM consultas ORDER BY data_hora, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_appointments_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<AppointmentSummary>, StoreError> {
        let rows = sqlx::query_as::<_, AppointmentSummary>(
            r#"
            SELECT c.id, c.data_hora, m.nome AS medico, e.nome AS especialidade
            FROM consultas c
            INNER JOIN medicos m ON c.medico_id = m.id
            INNER JOIN especialidades e ON m.especialidade_id = e.id
            WHERE c.usuario_id = $1
            ORDER BY c.data_hora, c.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn reschedule_appointment(
        &self,
        id: i32,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError> {
        let row = sqlx::query_as::<_, Appointment>(&format!(
            r#"
            UPDATE consultas SET data_hora = $1
            WHERE id = $2
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
        .bind(scheduled_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_appointment(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM consultas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
