//! Error types for the pure client layer

use thiserror::Error;

use crate::validation::ValidationError;

/// Failures raised by state transitions and form conversion, before any
/// request is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Save your profile first")]
    NoActiveUser,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("{}", .0.user_message())]
    Validation(ValidationError),
}

impl From<ValidationError> for StateError {
    fn from(err: ValidationError) -> Self {
        StateError::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_uses_label() {
        let err = StateError::from(ValidationError::new("height_cm", "must be greater than 0"));
        assert_eq!(err.to_string(), "Height: must be greater than 0");
    }

    #[test]
    fn test_invalid_date_display() {
        let err = StateError::InvalidDate("2025/05/14".to_string());
        assert_eq!(err.to_string(), "Invalid date '2025/05/14', expected YYYY-MM-DD");
    }
}
