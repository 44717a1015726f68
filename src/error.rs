//! Error types for Rollbook
//!
//! Provides a unified error type for all store operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::record::Key;

/// Result type alias using RollbookError
pub type Result<T> = std::result::Result<T, RollbookError>;

/// Unified error type for Rollbook operations
#[derive(Debug, Error)]
pub enum RollbookError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the data file failed; the file on disk may be incomplete
    #[error("Failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("No record with key {key}")]
    NotFound { key: Key },

    #[error("Capacity exceeded: store already holds {capacity} records")]
    CapacityExceeded { capacity: usize },

    #[error("A record with key {key} already exists")]
    DuplicateKey { key: Key },

    /// The assigned-key counter reached `Key::MAX`
    #[error("No keys left to assign after {last}")]
    KeyExhausted { last: Key },

    // -------------------------------------------------------------------------
    // Field Errors
    // -------------------------------------------------------------------------
    #[error("Unknown field: {field}")]
    UnknownField { field: String },

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Field {field} cannot be changed")]
    ImmutableField { field: String },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Parse error: {0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Book {key} is already issued")]
    AlreadyIssued { key: Key },

    #[error("Book {key} is not issued")]
    NotIssued { key: Key },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RollbookError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        RollbookError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
