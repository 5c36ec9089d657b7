//! Input validation errors
//!
//! Every calculator failure is a rejected user input. Callers show a retry
//! prompt and discard partial state.

use thiserror::Error;

/// The single error kind raised by conversions and engines
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("unknown sex '{value}' (expected male or female)")]
    UnknownSex { value: String },

    #[error("unknown activity level '{value}' (expected 1-5 or a level name)")]
    UnknownActivityLevel { value: String },

    #[error("unknown unit system '{value}' (expected metric or imperial)")]
    UnknownUnitSystem { value: String },
}

impl InvalidInputError {
    /// Name of the offending input field
    pub fn field(&self) -> &'static str {
        match self {
            InvalidInputError::Missing { field }
            | InvalidInputError::NotANumber { field, .. }
            | InvalidInputError::OutOfRange { field, .. } => field,
            InvalidInputError::UnknownSex { .. } => "sex",
            InvalidInputError::UnknownActivityLevel { .. } => "activity_level",
            InvalidInputError::UnknownUnitSystem { .. } => "unit_system",
        }
    }
}

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, InvalidInputError>;
