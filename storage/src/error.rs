//! Storage error types.
//!
//! Returned by the filter parsing, the query engine and the directory lookups.
//! An absent row is not an error: single lookups return `Option`.

use thiserror::Error;

/// Errors that can occur when querying the message store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The request itself is unusable (missing required field, malformed bound).
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl StorageError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the caller, rather than the store, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e.to_string())
    }
}
