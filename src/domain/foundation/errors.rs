//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be one of {allowed}, got {actual}")]
    NotAllowed {
        field: String,
        allowed: String,
        actual: i64,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an error for a value outside an enumerated set.
    pub fn not_allowed(field: impl Into<String>, allowed: impl Into<String>, actual: i64) -> Self {
        ValidationError::NotAllowed {
            field: field.into(),
            allowed: allowed.into(),
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("group_id");
        assert_eq!(format!("{}", err), "Field 'group_id' cannot be empty");
    }

    #[test]
    fn validation_error_not_allowed_displays_correctly() {
        let err = ValidationError::not_allowed("duration", "30, 60, 90, 120", 45);
        assert_eq!(
            format!("{}", err),
            "Field 'duration' must be one of 30, 60, 90, 120, got 45"
        );
    }
}
