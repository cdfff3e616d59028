//! Error types for Tanker core operations.
//!
//! The date input engine never produces these; it reports problems as
//! `InvalidReason` values. Everything above it (forms, storage, password
//! hashing) returns `TankerError`, which the CLI maps to user-facing text.

use thiserror::Error;

use crate::forms::FormErrors;

/// Result type alias for Tanker operations.
pub type Result<T> = std::result::Result<T, TankerError>;

/// Core error type for Tanker operations.
#[derive(Debug, Error)]
pub enum TankerError {
    /// One or more form fields failed validation
    #[error("Validation failed: {0}")]
    Validation(FormErrors),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input outside of a form
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Password hashing error
    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl TankerError {
    /// Field errors carried by a validation failure, if any.
    pub fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            TankerError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FormErrors> for TankerError {
    fn from(errors: FormErrors) -> Self {
        TankerError::Validation(errors)
    }
}

impl From<std::io::Error> for TankerError {
    fn from(err: std::io::Error) -> Self {
        TankerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TankerError {
    fn from(err: serde_json::Error) -> Self {
        TankerError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_storage() {
        let err: TankerError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(matches!(err, TankerError::Storage(_)));
        assert_eq!(err.to_string(), "Storage error: disk full");
    }

    #[test]
    fn test_validation_exposes_form_errors() {
        let mut errors = FormErrors::new();
        errors.push("name", "Name is required");
        let err = TankerError::from(errors);
        let fields = err.form_errors().expect("validation error");
        assert_eq!(fields.get("name"), Some("Name is required"));
        assert!(TankerError::NotFound("x".into()).form_errors().is_none());
    }
}
