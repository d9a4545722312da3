//! # Error Module
//!
//! Domain errors for identifier generation and validation, built on thiserror.

use thiserror::Error;

/// Core domain errors.
///
/// The core is a pure computation layer: none of these are retried
/// internally and none are logged here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // === Generation input errors ===
    #[error("Invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    // === Layout errors ===
    #[error("Format error: {field} is {length} characters, layout allows {max}")]
    Format {
        field: &'static str,
        length: usize,
        max: usize,
    },

    // === Validation errors ===
    #[error("Invalid IBAN {iban}: {reason}")]
    InvalidIban { iban: String, reason: String },

    #[error("Invalid account number {value}: {reason}")]
    InvalidAccountNumber { value: String, reason: String },

    #[error("Unknown account type: {0}")]
    UnknownAccountType(String),

    #[error("Unknown account status: {0}")]
    UnknownAccountStatus(String),
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Create a Format error
    pub fn format(field: &'static str, length: usize, max: usize) -> Self {
        Self::Format { field, length, max }
    }

    /// Create an InvalidIban error
    pub fn invalid_iban(iban: &str, reason: impl Into<String>) -> Self {
        Self::InvalidIban {
            iban: iban.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}
