//! # Persistence Errors
//!
//! Error types for the persistence layer.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// A unique field already holds this value. Callers that generated the
    /// value may generate a new one and retry.
    #[error("Duplicate key: {field} = {value}")]
    DuplicateKey { field: &'static str, value: String },

    #[error("Record not found: {entity} with {key}")]
    NotFound { entity: &'static str, key: String },
}

/// Result type alias for PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    pub fn duplicate_key(field: &'static str, value: impl ToString) -> Self {
        Self::DuplicateKey {
            field,
            value: value.to_string(),
        }
    }

    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Whether the write was rejected by a uniqueness constraint
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
