//! Error types shared across the platform core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormsError {
    #[error("Form not found")]
    FormNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormsError>;
