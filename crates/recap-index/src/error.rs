//! Index error types.

use thiserror::Error;

/// Errors that can occur during store and index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record not found.
    #[error("Record not found: {0}")]
    NotFound(String),
}
