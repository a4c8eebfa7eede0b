//! Error types for the blobstate core library.

use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the blobstate library.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Object not found
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The supplied version token no longer matches the stored object
    #[error("Version conflict for key {key}: {message}")]
    VersionConflict { key: String, message: String },

    /// Storage backend error
    #[error("Backend error: {0}")]
    Backend(String),
}

impl Error {
    /// True if this error is a version conflict.
    ///
    /// Callers that opted into optimistic locking branch on this to decide
    /// whether to re-read and retry.
    pub fn is_version_conflict(&self) -> bool {
        matches!(
            self,
            Error::Storage(StorageError::VersionConflict { .. })
        )
    }

    /// True if this error reports an absent object.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Storage(StorageError::NotFound(_)))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
