use crate::domain::BookingError;

pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Parses a route segment into a row id. Clients have been seen sending the
/// literal text `undefined` for an unset id; it fails here like any other
/// non-numeric value.
pub fn parse_id(raw: &str, what: &str) -> Result<i32, BookingError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "undefined" || raw == "null" {
        return Err(BookingError::Validation(format!(
            "ID {what} não enviado, inválido ou undefined."
        )));
    }
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(BookingError::Validation(format!("ID {what} inválido: {raw}"))),
    }
}
