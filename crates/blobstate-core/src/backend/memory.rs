//! In-memory storage backend for testing.

use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, ObjectStore, PutPayload};
use std::sync::Arc;

use super::{classify, put_options, BlobBackend, VersionedBlob, WriteCondition};
use crate::error::StorageError;
use crate::Result;

/// In-memory storage backend using object_store
///
/// This backend is primarily useful for testing purposes as it doesn't
/// persist data between runs. It honors the same conditional-write
/// semantics as the remote backends, so optimistic-concurrency behavior
/// can be exercised without network access.
pub struct MemoryBackend {
    store: Arc<InMemory>,
}

impl MemoryBackend {
    /// Create a new in-memory storage backend
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobBackend for MemoryBackend {
    async fn fetch(&self, name: &str) -> Result<VersionedBlob> {
        let path = Path::from(name);
        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| classify("Memory GET", name, e))?;

        let version = result.meta.e_tag.clone().ok_or_else(|| {
            StorageError::Backend(format!("Memory GET returned no version token for {}", name))
        })?;
        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| v.to_string());

        let data = result
            .bytes()
            .await
            .map_err(|e| StorageError::Backend(format!("Failed to read bytes: {}", e)))?;

        Ok(VersionedBlob {
            data,
            version,
            content_type,
        })
    }

    async fn store(
        &self,
        name: &str,
        data: Bytes,
        content_type: Option<&str>,
        condition: &WriteCondition,
    ) -> Result<String> {
        let path = Path::from(name);
        let result = self
            .store
            .put_opts(
                &path,
                PutPayload::from_bytes(data),
                put_options(content_type, condition),
            )
            .await
            .map_err(|e| classify("Memory PUT", name, e))?;

        result.e_tag.ok_or_else(|| {
            StorageError::Backend(format!("Memory PUT returned no version token for {}", name)).into()
        })
    }

    async fn remove(&self, name: &str, condition: &WriteCondition) -> Result<()> {
        let path = Path::from(name);

        // object_store has no conditional delete; a match condition is
        // checked against a fresh head before the delete is issued.
        if let WriteCondition::IfMatch(expected) = condition {
            let meta = self
                .store
                .head(&path)
                .await
                .map_err(|e| classify("Memory HEAD", name, e))?;
            if meta.e_tag.as_deref() != Some(expected.as_str()) {
                return Err(StorageError::VersionConflict {
                    key: name.to_string(),
                    message: format!(
                        "expected version {} but found {}",
                        expected,
                        meta.e_tag.as_deref().unwrap_or("none")
                    ),
                }
                .into());
            }
        }

        self.store
            .delete(&path)
            .await
            .map_err(|e| classify("Memory DELETE", name, e))?;
        Ok(())
    }

    async fn check(&self) -> Result<()> {
        self.store
            .list_with_delimiter(None)
            .await
            .map_err(|e| StorageError::Backend(format!("Memory probe failed: {}", e)))?;
        Ok(())
    }

    fn endpoint(&self) -> String {
        "memory://".to_string()
    }
}
