//! Blob storage backend abstraction and implementations.
//!
//! This module provides the interface the state store speaks against:
//! conditional get/put/delete of named objects carrying opaque version
//! tokens. Implementations:
//!
//! - **Azure**: Azure Blob Storage (ETag-based concurrency)
//! - **Memory**: In-memory storage (for testing)

mod azure;
mod config;
mod memory;

pub use azure::{AzureBackend, AzureConfig};
pub use config::BackendConfig;
pub use memory::MemoryBackend;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::{Attribute, Attributes, PutMode, PutOptions, UpdateVersion};
use std::sync::Arc;

use crate::error::StorageError;
use crate::Result;

/// Precondition attached to a write or delete request, evaluated atomically
/// by the backend before the mutation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteCondition {
    /// Apply unconditionally.
    None,
    /// Apply only if the object does not already exist.
    IfAbsent,
    /// Apply only if the object's current version token matches.
    IfMatch(String),
}

/// An object read back from the backend: payload plus the version token
/// and content type observed in the same round trip.
#[derive(Debug, Clone)]
pub struct VersionedBlob {
    /// Object payload
    pub data: Bytes,
    /// Version token assigned by the backend on the last mutation
    pub version: String,
    /// Content type recorded at write time, if any
    pub content_type: Option<String>,
}

/// Trait for blob storage backends
#[async_trait]
pub trait BlobBackend: Send + Sync {
    /// Read an object and its version token in one round trip.
    async fn fetch(&self, name: &str) -> Result<VersionedBlob>;

    /// Conditionally write an object, returning the new version token.
    async fn store(
        &self,
        name: &str,
        data: Bytes,
        content_type: Option<&str>,
        condition: &WriteCondition,
    ) -> Result<String>;

    /// Conditionally delete an object.
    async fn remove(&self, name: &str, condition: &WriteCondition) -> Result<()>;

    /// Metadata-only liveness probe against the backing container.
    async fn check(&self) -> Result<()>;

    /// Endpoint description used in diagnostics.
    fn endpoint(&self) -> String;
}

/// Create a storage backend from configuration.
pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn BlobBackend>> {
    match config {
        BackendConfig::Azure {
            account_name,
            container_name,
            account_key,
            endpoint,
            client_id,
            tenant_id,
            client_secret,
            sas_token,
        } => {
            let azure_config = AzureConfig {
                account_name: account_name.clone(),
                container_name: container_name.clone(),
                account_key: account_key.clone(),
                endpoint: endpoint.clone(),
                client_id: client_id.clone(),
                tenant_id: tenant_id.clone(),
                client_secret: client_secret.clone(),
                sas_token: sas_token.clone(),
            };
            Ok(Arc::new(AzureBackend::new(azure_config)?))
        }

        BackendConfig::Memory => Ok(Arc::new(MemoryBackend::new())),
    }
}

/// Translate a backend error into the crate's closed taxonomy.
///
/// This is the single place that understands `object_store` error codes:
/// "object does not exist" becomes [`StorageError::NotFound`], a failed
/// precondition (stale version token, or object already present under an
/// if-absent write) becomes [`StorageError::VersionConflict`], and
/// everything else passes through as a backend error carrying the
/// operation and object name for diagnostics.
pub(crate) fn classify(op: &str, name: &str, err: object_store::Error) -> StorageError {
    match err {
        object_store::Error::NotFound { .. } => StorageError::NotFound(name.to_string()),
        object_store::Error::Precondition { source, .. }
        | object_store::Error::AlreadyExists { source, .. } => StorageError::VersionConflict {
            key: name.to_string(),
            message: source.to_string(),
        },
        other => StorageError::Backend(format!("{} failed for {}: {}", op, name, other)),
    }
}

/// Build `object_store` put options from a write condition and an optional
/// content type hint.
pub(crate) fn put_options(content_type: Option<&str>, condition: &WriteCondition) -> PutOptions {
    let mode = match condition {
        WriteCondition::None => PutMode::Overwrite,
        WriteCondition::IfAbsent => PutMode::Create,
        WriteCondition::IfMatch(tag) => PutMode::Update(UpdateVersion {
            e_tag: Some(tag.clone()),
            version: None,
        }),
    };

    let mut attributes = Attributes::new();
    if let Some(ct) = content_type {
        attributes.insert(Attribute::ContentType, ct.to_string().into());
    }

    PutOptions {
        mode,
        attributes,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_memory_backend() {
        let config = BackendConfig::Memory;
        let backend = create_backend(&config).unwrap();

        let version = backend
            .store("probe", Bytes::from("hello"), None, &WriteCondition::None)
            .await
            .unwrap();
        assert!(!version.is_empty());

        let blob = backend.fetch("probe").await.unwrap();
        assert_eq!(blob.data, Bytes::from("hello"));
        assert_eq!(blob.version, version);

        backend.remove("probe", &WriteCondition::None).await.unwrap();
        let err = backend.fetch("probe").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_put_options_modes() {
        assert!(matches!(
            put_options(None, &WriteCondition::None).mode,
            PutMode::Overwrite
        ));
        assert!(matches!(
            put_options(None, &WriteCondition::IfAbsent).mode,
            PutMode::Create
        ));
        match put_options(None, &WriteCondition::IfMatch("abc".into())).mode {
            PutMode::Update(v) => assert_eq!(v.e_tag.as_deref(), Some("abc")),
            other => panic!("expected update mode, got {:?}", other),
        }
    }
}
