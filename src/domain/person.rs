use chrono::{NaiveDate, Utc};

use crate::utils::strip_non_digits;

const MAX_NAME_LENGTH: usize = 120;
const MAX_PASSWORD_BYTES: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(raw: &str) -> Result<PersonName, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("O nome é obrigatório".to_string());
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(format!(
                "O nome deve ter no máximo {MAX_NAME_LENGTH} caracteres"
            ));
        }
        if trimmed.chars().any(|c| c.is_control()) {
            return Err("O nome contém caracteres inválidos".to_string());
        }
        Ok(PersonName(trimmed.to_string()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A plaintext password on its way to the hasher. Never serialized.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub fn parse(raw: String) -> Result<Password, String> {
        if raw.is_empty() {
            return Err("A senha é obrigatória".to_string());
        }
        if raw.len() > MAX_PASSWORD_BYTES {
            return Err(format!(
                "A senha deve ter no máximo {MAX_PASSWORD_BYTES} caracteres"
            ));
        }
        Ok(Password(raw))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    /// Landlines have 10 digits with area code, mobiles 11. Blank input means no phone.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Phone>, String> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };
        if raw.chars().any(|c| c.is_alphabetic()) {
            return Err(format!("Telefone inválido: {raw}"));
        }
        let digits = strip_non_digits(raw);
        match digits.len() {
            10 | 11 => Ok(Some(Phone(digits))),
            _ => Err(format!("Telefone inválido: {raw}")),
        }
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn validate_birth_date(date: Option<NaiveDate>) -> Result<Option<NaiveDate>, String> {
    match date {
        Some(date) if date > Utc::now().date_naive() => {
            Err("A data de nascimento não pode estar no futuro".to_string())
        }
        other => Ok(other),
    }
}
