//! Versioned state store over a blob storage backend.
//!
//! Translates Get/Set/Delete/Ping into conditional requests against the
//! backend, using the backend's opaque version token as the sole
//! concurrency primitive. The store holds no mutable state and performs
//! no client-side locking, retries or queuing; all conflict detection is
//! the backend's compare-and-swap on the version token.

mod codec;
mod concurrency;
mod key;

pub use codec::StateValue;
pub use concurrency::{delete_condition, write_condition, Concurrency};
pub use key::object_name;

use bytes::Bytes;
use futures::future::join_all;
use std::sync::Arc;
use tracing::debug;

use crate::backend::{create_backend, BackendConfig, BlobBackend, WriteCondition};
use crate::error::StorageError;
use crate::{Error, Result};

/// A state entry read back from the store.
#[derive(Debug, Clone)]
pub struct StateEntry {
    /// Stored payload
    pub data: Bytes,
    /// Version token assigned by the backend on the last mutation.
    /// Opaque; valid only until the next successful mutation of the key.
    pub version: String,
    /// Content type recorded at write time, if any
    pub content_type: Option<String>,
}

/// A write request.
#[derive(Debug, Clone)]
pub struct SetRequest {
    /// Logical state key, optionally of form `"<prefix>||<name>"`
    pub key: String,
    /// Value to store
    pub value: StateValue,
    /// Expected version token from a prior read or write, if the caller
    /// wants optimistic locking
    pub version: Option<String>,
    /// Write policy when no version token is supplied
    pub concurrency: Concurrency,
    /// Content type hint passed through to storage, not parsed here
    pub content_type: Option<String>,
}

impl SetRequest {
    /// Unconditional write of a value.
    pub fn new(key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            version: None,
            concurrency: Concurrency::default(),
            content_type: None,
        }
    }

    /// Require the stored version to match `version`.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the write policy for the no-version case.
    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Attach a content type hint.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A delete request.
#[derive(Debug, Clone)]
pub struct DeleteRequest {
    /// Logical state key
    pub key: String,
    /// Expected version token, if the caller wants optimistic locking
    pub version: Option<String>,
}

impl DeleteRequest {
    /// Unconditional delete.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            version: None,
        }
    }

    /// Require the stored version to match `version`.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// Key-value state store with optimistic concurrency over blob storage.
pub struct VersionedStateStore {
    backend: Arc<dyn BlobBackend>,
}

impl VersionedStateStore {
    /// Create a store over an existing backend.
    pub fn new(backend: Arc<dyn BlobBackend>) -> Self {
        Self { backend }
    }

    /// Create a store from backend configuration.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Ok(Self::new(create_backend(config)?))
    }

    /// Read a key's value, version token and content type in one round trip.
    ///
    /// A key that was never written (or already deleted) is `Ok(None)`,
    /// not an error.
    pub async fn get(&self, key: &str) -> Result<Option<StateEntry>> {
        let name = object_name(key);
        debug!("GET {} -> {}", key, name);

        match self.backend.fetch(name).await {
            Ok(blob) => Ok(Some(StateEntry {
                data: blob.data,
                version: blob.version,
                content_type: blob.content_type,
            })),
            Err(Error::Storage(StorageError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Conditionally write a key.
    ///
    /// A supplied version token always wins over the declared concurrency
    /// mode; see [`write_condition`]. A rejected precondition surfaces as
    /// [`StorageError::VersionConflict`] whenever the caller expressed one
    /// (an explicit version, or [`Concurrency::FirstWrite`]); failures of
    /// unconditional writes are backend errors. The new version token is
    /// discoverable via a subsequent [`get`](Self::get).
    pub async fn set(&self, req: SetRequest) -> Result<()> {
        let SetRequest {
            key,
            value,
            version,
            concurrency,
            content_type,
        } = req;

        let condition = write_condition(version.as_deref(), concurrency);
        let conditional = condition != WriteCondition::None;
        let data = value.into_bytes()?;

        let name = object_name(&key);
        debug!("SET {} -> {} ({:?})", key, name, condition);

        match self
            .backend
            .store(name, data, content_type.as_deref(), &condition)
            .await
        {
            Ok(_new_version) => Ok(()),
            Err(Error::Storage(StorageError::VersionConflict { message, .. })) if conditional => {
                // Reported under the logical key, not the object name.
                Err(StorageError::VersionConflict { key, message }.into())
            }
            Err(Error::Storage(StorageError::VersionConflict { message, .. })) => {
                Err(StorageError::Backend(format!("write of {} failed: {}", key, message)).into())
            }
            Err(e) => Err(e),
        }
    }

    /// Conditionally delete a key.
    ///
    /// Deleting an absent key succeeds, with or without a version token:
    /// absence wins over version mismatch, there is nothing to conflict
    /// with. A stale token against an existing key surfaces as
    /// [`StorageError::VersionConflict`].
    pub async fn delete(&self, req: DeleteRequest) -> Result<()> {
        let DeleteRequest { key, version } = req;

        let condition = delete_condition(version.as_deref());
        let name = object_name(&key);
        debug!("DELETE {} -> {} ({:?})", key, name, condition);

        match self.backend.remove(name, &condition).await {
            Ok(()) => Ok(()),
            Err(Error::Storage(StorageError::NotFound(_))) => Ok(()),
            Err(Error::Storage(StorageError::VersionConflict { message, .. })) => {
                Err(StorageError::VersionConflict { key, message }.into())
            }
            Err(e) => Err(e),
        }
    }

    /// Single liveness probe against the backing container. No retries;
    /// those are the caller's responsibility.
    pub async fn ping(&self) -> Result<()> {
        self.backend.check().await.map_err(|e| {
            StorageError::Backend(format!(
                "error connecting to state store at {}: {}",
                self.backend.endpoint(),
                e
            ))
            .into()
        })
    }

    /// Read several keys as independent per-key calls. No atomicity
    /// across keys; each key's outcome is reported individually.
    pub async fn get_bulk(&self, keys: &[String]) -> Vec<(String, Result<Option<StateEntry>>)> {
        join_all(keys.iter().map(|key| async move {
            (key.clone(), self.get(key).await)
        }))
        .await
    }

    /// Write several keys as independent per-key calls.
    pub async fn set_bulk(&self, requests: Vec<SetRequest>) -> Vec<(String, Result<()>)> {
        join_all(requests.into_iter().map(|req| async move {
            let key = req.key.clone();
            (key, self.set(req).await)
        }))
        .await
    }

    /// Delete several keys as independent per-key calls.
    pub async fn delete_bulk(&self, requests: Vec<DeleteRequest>) -> Vec<(String, Result<()>)> {
        join_all(requests.into_iter().map(|req| async move {
            let key = req.key.clone();
            (key, self.delete(req).await)
        }))
        .await
    }
}
