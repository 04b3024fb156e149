// error.rs — Error types for the persistence layer.

use thiserror::Error;

/// Errors that can occur while reading or writing snapshots.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize snapshot data.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
