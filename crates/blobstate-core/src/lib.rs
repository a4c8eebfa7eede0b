//! Blobstate Core Library
//!
//! Key-value state persistence over blob storage with optimistic
//! concurrency. Every stored object carries an opaque version token
//! assigned by the backend; writes and deletes can be made conditional on
//! that token, and conflicts surface as a distinct error variant callers
//! can branch on.

pub mod backend;
pub mod error;
pub mod store;

pub use backend::{
    create_backend, AzureBackend, AzureConfig, BackendConfig, BlobBackend, MemoryBackend,
    VersionedBlob, WriteCondition,
};
pub use error::{Error, Result, StorageError};
pub use store::{
    Concurrency, DeleteRequest, SetRequest, StateEntry, StateValue, VersionedStateStore,
};
