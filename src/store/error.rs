//! Storage-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the durable store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read a stored value
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a value
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create the store directory
    #[error("Failed to create store directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Value does not fit in the remaining quota
    #[error("Storage quota exceeded: {needed} bytes needed, {quota} bytes allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Stored text is not a valid document
    #[error("Stored document is corrupt: {0}")]
    Corrupt(String),

    /// Document could not be serialized
    #[error("Failed to serialize document: {0}")]
    SerializationFailed(String),
}
