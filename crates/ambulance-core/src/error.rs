use thiserror::Error;

use crate::id::IdError;

/// Core error types for waiting-list operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid ambulance ID: {0}")]
    InvalidId(#[from] IdError),

    #[error("Ambulance ID in body '{body}' does not match path ID '{path}'")]
    IdMismatch { path: String, body: String },

    #[error("Condition code '{0}' appears more than once")]
    DuplicateCode(String),
}

impl CoreError {
    /// Create a new IdMismatch error
    pub fn id_mismatch(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::IdMismatch {
            path: path.into(),
            body: body.into(),
        }
    }
}

/// Result type alias for waiting-list operations
pub type Result<T> = std::result::Result<T, CoreError>;
