//! Storage error types
//!
//! The simulation itself never fails; only the storage boundary does. Callers
//! at the gameplay level log these and carry on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// No storage backend (private browsing, sandboxed iframe, ...)
    #[error("storage backend unavailable")]
    Unavailable,

    /// The backend refused a read or write
    #[error("storage {op} failed for '{key}': {message}")]
    Backend {
        op: &'static str,
        key: String,
        message: String,
    },

    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded
    #[error("malformed value for '{key}': {source}")]
    Format {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
