//! Custom error types for the money tracker
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for money tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    RecordNotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The import source contained no lines at all
    #[error("The file is empty")]
    EmptyFile,

    /// The import header row did not match the backup format
    #[error("Invalid CSV headers. Expected: {}. Found: {}", .expected.join(", "), .found.join(", "))]
    InvalidHeaders {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The underlying store rejected a write
    #[error("Failed to persist changes: {0}")]
    PersistenceWriteFailed(String),

    /// Storage read errors (missing or unparseable data)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TrackerError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::RecordNotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::RecordNotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error aborted a CSV import as a whole
    pub fn is_import_rejection(&self) -> bool {
        matches!(self, Self::EmptyFile | Self::InvalidHeaders { .. })
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for money tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
