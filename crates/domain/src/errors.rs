//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid city name (empty, or longer than the allowed maximum)
    #[error("Invalid city name: {0}")]
    InvalidCityName(String),

    /// Temperature parameter outside the supported range
    #[error("Invalid temperature {value}: must be between 0.0 and 1.0")]
    InvalidTemperature { value: f32 },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}
