//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is absent or empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value could not be interpreted (bad JSON, non-integer id, ...)
    InvalidFormat { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } | Self::InvalidFormat { field, .. } => {
                field
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required and cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 255,
        };
        assert_eq!(
            err.to_string(),
            "title exceeds maximum length of 255 characters"
        );
        assert_eq!(err.field(), "title");
    }

    #[test]
    fn invalid_format_display() {
        let err = ValidationError::InvalidFormat {
            field: "id",
            reason: "must be an integer".into(),
        };
        assert_eq!(err.to_string(), "id: must be an integer");
    }
}
