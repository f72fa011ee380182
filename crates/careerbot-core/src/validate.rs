//! Field validation shared by the server and the client form.

use uuid::Uuid;

use crate::error::CoreError;
use crate::models::student::NewStudent;

/// Names of required registration fields that are empty or whitespace-only,
/// in form order.
pub fn missing_fields(student: &NewStudent) -> Vec<&'static str> {
    [
        ("name", &student.name),
        ("class", &student.class),
        ("interests", &student.interests),
        ("location", &student.location),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect()
}

/// Reject a registration unless every required field carries text.
pub fn validate_new_student(student: &NewStudent) -> Result<(), CoreError> {
    match missing_fields(student).first() {
        Some(field) => Err(CoreError::MissingField((*field).to_string())),
        None => Ok(()),
    }
}

/// Parse a record id from a path segment or request field.
pub fn parse_id(raw: &str) -> Result<Uuid, CoreError> {
    Ok(Uuid::parse_str(raw.trim())?)
}
