//! Business layer errors
//!
//! Uses anyhow for error aggregation with custom error types.

use thiserror::Error;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    // === Generation errors ===
    #[error("No unique account identifiers after {attempts} attempts")]
    IdentifierSpaceExhausted { attempts: u32 },

    // === Not found errors ===
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // === Identity errors ===
    #[error("No current identity: {0}")]
    IdentityUnavailable(String),

    // === Configuration errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Wrapped errors ===
    #[error("Persistence error: {0}")]
    Persistence(#[from] ibank_persistence::PersistenceError),

    #[error("Core error: {0}")]
    Core(#[from] ibank_core::CoreError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = anyhow::Result<T>;

impl BusinessError {
    /// Create account not found error for an id
    pub fn account_not_found(id: u64) -> Self {
        Self::AccountNotFound(format!("id {}", id))
    }

    /// Whether the error came from malformed caller input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::Core(
                ibank_core::CoreError::InvalidInput { .. }
                    | ibank_core::CoreError::InvalidIban { .. }
                    | ibank_core::CoreError::InvalidAccountNumber { .. }
            )
        )
    }
}
