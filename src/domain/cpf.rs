use std::sync::LazyLock;

use regex::Regex;

use crate::utils::strip_non_digits;

static CPF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{11}$").expect("CPF pattern is a valid regex"));

/// An 11-digit Brazilian taxpayer number, stored without punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Accepts `12345678901` as well as the masked `123.456.789-01`.
    pub fn parse(raw: &str) -> Result<Cpf, String> {
        if raw.chars().any(|c| c.is_alphabetic()) {
            return Err(format!("CPF inválido: {raw}"));
        }
        let digits = strip_non_digits(raw);
        if !CPF_PATTERN.is_match(&digits) {
            return Err(format!("CPF inválido: {raw}"));
        }
        Ok(Cpf(digits))
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
