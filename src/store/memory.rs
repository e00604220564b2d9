use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::{BookingStore, CPF_UNIQUE_CONSTRAINT, DOCTOR_SLOT_UNIQUE_CONSTRAINT};
use crate::domain::{
    Appointment, AppointmentSummary, Cpf, Doctor, NewAppointment, NewUser, Specialty, StoreError,
    User, UserChanges,
};

/// A process-local store with the same constraints as the Postgres schema:
/// unique CPF, unique doctor slot, foreign keys, cascade on user removal.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    specialties: BTreeMap<i32, Specialty>,
    doctors: BTreeMap<i32, Doctor>,
    appointments: BTreeMap<i32, Appointment>,
    last_user_id: i32,
    last_specialty_id: i32,
    last_doctor_id: i32,
    last_appointment_id: i32,
}

impl Tables {
    fn cpf_taken(&self, cpf: &str, except: Option<i32>) -> bool {
        self.users
            .values()
            .any(|u| u.cpf == cpf && Some(u.id) != except)
    }

    fn slot_taken(&self, doctor_id: i32, at: DateTime<Utc>, except: Option<i32>) -> bool {
        self.appointments
            .values()
            .any(|a| a.doctor_id == doctor_id && a.scheduled_at == at && Some(a.id) != except)
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference data is not created through the API; this stands in for seeding.
    pub async fn add_specialty(&self, name: &str) -> Specialty {
        let mut tables = self.tables.lock().await;
        tables.last_specialty_id += 1;
        let specialty = Specialty {
            id: tables.last_specialty_id,
            name: name.to_string(),
        };
        tables.specialties.insert(specialty.id, specialty.clone());
        specialty
    }

    pub async fn add_doctor(
        &self,
        name: &str,
        specialty_id: i32,
        avatar_url: Option<&str>,
    ) -> Result<Doctor, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.specialties.contains_key(&specialty_id) {
            return Err(StoreError::ForeignKeyViolation(
                "medicos_especialidade_id_fkey".to_string(),
            ));
        }
        tables.last_doctor_id += 1;
        let doctor = Doctor {
            id: tables.last_doctor_id,
            name: name.to_string(),
            specialty_id,
            avatar_url: avatar_url.map(str::to_string),
        };
        tables.doctors.insert(doctor.id, doctor.clone());
        Ok(doctor)
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn insert_user(&self, user: &NewUser, password_hash: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.cpf_taken(user.cpf.as_ref(), None) {
            return Err(StoreError::UniqueViolation(CPF_UNIQUE_CONSTRAINT.to_string()));
        }
        tables.last_user_id += 1;
        let row = User {
            id: tables.last_user_id,
            name: user.name.as_ref().to_string(),
            cpf: user.cpf.as_ref().to_string(),
            password_hash: password_hash.to_string(),
            phone: user.phone.as_ref().map(|p| p.as_ref().to_string()),
            birth_date: user.birth_date,
        };
        tables.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn find_user_by_cpf(&self, cpf: &Cpf) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.cpf == cpf.as_ref())
            .cloned())
    }

    async fn update_user(
        &self,
        id: i32,
        changes: &UserChanges,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        if tables.cpf_taken(changes.cpf.as_ref(), Some(id)) {
            return Err(StoreError::UniqueViolation(CPF_UNIQUE_CONSTRAINT.to_string()));
        }
        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        user.name = changes.name.as_ref().to_string();
        user.cpf = changes.cpf.as_ref().to_string();
        user.password_hash = password_hash.to_string();
        user.phone = changes.phone.as_ref().map(|p| p.as_ref().to_string());
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: i32) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.appointments.retain(|_, a| a.user_id != id);
        Ok(true)
    }

    async fn list_specialties(&self) -> Result<Vec<Specialty>, StoreError> {
        let tables = self.tables.lock().await;
        let mut specialties: Vec<Specialty> = tables.specialties.values().cloned().collect();
        specialties.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(specialties)
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, StoreError> {
        Ok(self.tables.lock().await.doctors.values().cloned().collect())
    }

    async fn list_doctors_by_specialty(
        &self,
        specialty_id: i32,
    ) -> Result<Vec<Doctor>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .doctors
            .values()
            .filter(|d| d.specialty_id == specialty_id)
            .cloned()
            .collect())
    }

    async fn insert_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains_key(&appointment.user_id) {
            return Err(StoreError::ForeignKeyViolation(
                "consultas_usuario_id_fkey".to_string(),
            ));
        }
        if !tables.doctors.contains_key(&appointment.doctor_id) {
            return Err(StoreError::ForeignKeyViolation(
                "consultas_medico_id_fkey".to_string(),
            ));
        }
        if tables.slot_taken(appointment.doctor_id, appointment.scheduled_at, None) {
            return Err(StoreError::UniqueViolation(
                DOCTOR_SLOT_UNIQUE_CONSTRAINT.to_string(),
            ));
        }
        tables.last_appointment_id += 1;
        let row = Appointment {
            id: tables.last_appointment_id,
            user_id: appointment.user_id,
            doctor_id: appointment.doctor_id,
            scheduled_at: appointment.scheduled_at,
        };
        tables.appointments.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_appointment(&self, id: i32) -> Result<Option<Appointment>, StoreError> {
        Ok(self.tables.lock().await.appointments.get(&id).cloned())
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, StoreError> {
        let tables = self.tables.lock().await;
        let mut appointments: Vec<Appointment> = tables.appointments.values().cloned().collect();
        appointments.sort_by_key(|a| (a.scheduled_at, a.id));
        Ok(appointments)
    }

    async fn list_appointments_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<AppointmentSummary>, StoreError> {
        let tables = self.tables.lock().await;
        let mut summaries: Vec<AppointmentSummary> = tables
            .appointments
            .values()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| {
                let doctor = tables.doctors.get(&a.doctor_id)?;
                let specialty = tables.specialties.get(&doctor.specialty_id)?;
                Some(AppointmentSummary {
                    id: a.id,
                    scheduled_at: a.scheduled_at,
                    doctor_name: doctor.name.clone(),
                    specialty_name: specialty.name.clone(),
                })
            })
            .collect();
        summaries.sort_by_key(|s| (s.scheduled_at, s.id));
        Ok(summaries)
    }

    async fn reschedule_appointment(
        &self,
        id: i32,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError> {
        let mut tables = self.tables.lock().await;
        let Some(doctor_id) = tables.appointments.get(&id).map(|a| a.doctor_id) else {
            return Ok(None);
        };
        if tables.slot_taken(doctor_id, scheduled_at, Some(id)) {
            return Err(StoreError::UniqueViolation(
                DOCTOR_SLOT_UNIQUE_CONSTRAINT.to_string(),
            ));
        }
        let Some(appointment) = tables.appointments.get_mut(&id) else {
            return Ok(None);
        };
        appointment.scheduled_at = scheduled_at;
        Ok(Some(appointment.clone()))
    }

    async fn delete_appointment(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables.lock().await.appointments.remove(&id).is_some())
    }
}
