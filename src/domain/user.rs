use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::{Cpf, Password, PersonName, Phone};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    #[serde(rename = "nome")]
    #[sqlx(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(skip_serializing)]
    #[sqlx(rename = "senha_hash")]
    pub password_hash: String,
    #[serde(rename = "telefone")]
    #[sqlx(rename = "telefone")]
    pub phone: Option<String>,
    #[serde(rename = "data_nascimento")]
    #[sqlx(rename = "data_nascimento")]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug)]
pub struct NewUser {
    pub name: PersonName,
    pub cpf: Cpf,
    pub password: Password,
    pub phone: Option<Phone>,
    pub birth_date: Option<NaiveDate>,
}

/// Profile overwrite. Birth date is not part of it.
#[derive(Debug)]
pub struct UserChanges {
    pub name: PersonName,
    pub cpf: Cpf,
    pub password: Password,
    pub phone: Option<Phone>,
}

#[derive(Debug)]
pub struct Credentials {
    pub cpf: Cpf,
    pub password: Password,
}
