// Ambulance identifiers are opaque strings; generated ones are UUID v4.
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Identifier must not be empty")]
    Empty,
    #[error("Identifier must not contain '/': {0}")]
    ContainsSlash(String),
}

pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Checks that a client-supplied identifier can be used as a path segment.
pub fn validate_id(id: &str) -> Result<(), IdError> {
    if id.is_empty() {
        return Err(IdError::Empty);
    }
    if id.contains('/') {
        return Err(IdError::ContainsSlash(id.to_string()));
    }
    Ok(())
}
