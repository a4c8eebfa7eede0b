//! Azure Blob Storage backend implementation.

use async_trait::async_trait;
use bytes::Bytes;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::path::Path;
use object_store::{Attribute, ObjectStore, PutPayload};
use std::sync::Arc;
use tracing::{debug, info};

use super::{classify, put_options, BlobBackend, VersionedBlob, WriteCondition};
use crate::error::StorageError;
use crate::{Error, Result};

/// Azure Blob Storage backend configuration
#[derive(Debug, Clone)]
pub struct AzureConfig {
    /// Azure storage account name
    pub account_name: String,
    /// Azure blob container name
    pub container_name: String,
    /// Storage account key (if None, uses DefaultAzureCredential chain)
    pub account_key: Option<String>,
    /// Custom endpoint URL for sovereign clouds (Azure Government, Azure China)
    pub endpoint: Option<String>,
    /// Azure AD client ID (for service principal authentication)
    pub client_id: Option<String>,
    /// Azure AD tenant ID (for service principal authentication)
    pub tenant_id: Option<String>,
    /// Client secret (for service principal authentication)
    pub client_secret: Option<String>,
    /// SAS token for shared access signature authentication
    pub sas_token: Option<String>,
}

/// Azure Blob Storage backend
///
/// Concurrency is backed by blob ETags: every successful mutation assigns
/// a fresh ETag, and conditional writes carry `If-Match` / `If-None-Match`
/// preconditions evaluated atomically by the service.
pub struct AzureBackend {
    store: Arc<dyn ObjectStore>,
    endpoint: String,
}

impl AzureBackend {
    /// Create a new Azure Blob Storage backend
    ///
    /// Authentication methods (in order of precedence):
    /// 1. SAS token (`sas_token`)
    /// 2. Storage account key (`account_key`)
    /// 3. Service principal (`client_id` + `client_secret` + `tenant_id`)
    /// 4. DefaultAzureCredential chain (environment, managed identity, CLI)
    pub fn new(config: AzureConfig) -> Result<Self> {
        let mut builder = MicrosoftAzureBuilder::new()
            .with_account(&config.account_name)
            .with_container_name(&config.container_name);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint.clone());
        }

        if let Some(sas_token) = &config.sas_token {
            // SAS token authentication - parse query string into key-value pairs
            let pairs: Vec<(String, String)> = sas_token
                .trim_start_matches('?')
                .split('&')
                .filter_map(|pair| {
                    let mut parts = pair.splitn(2, '=');
                    match (parts.next(), parts.next()) {
                        (Some(k), Some(v)) => Some((k.to_string(), v.to_string())),
                        _ => None,
                    }
                })
                .collect();
            builder = builder.with_sas_authorization(pairs);
            debug!("Azure authentication: SAS token");
        } else if let Some(key) = &config.account_key {
            builder = builder.with_access_key(key);
            debug!("Azure authentication: Account key");
        } else if config.client_secret.is_some() {
            if let Some(client_id) = &config.client_id {
                builder = builder.with_client_id(client_id);
            }
            if let Some(tenant_id) = &config.tenant_id {
                builder = builder.with_tenant_id(tenant_id);
            }
            if let Some(client_secret) = &config.client_secret {
                builder = builder.with_client_secret(client_secret);
            }
            debug!("Azure authentication: Service principal");
        } else {
            debug!("Azure authentication: DefaultAzureCredential chain");
        }

        let store = builder.build().map_err(|e| {
            Error::Storage(StorageError::Backend(format!(
                "Failed to create Azure client: {}",
                e
            )))
        })?;

        let endpoint = match &config.endpoint {
            Some(e) => format!("{}/{}", e.trim_end_matches('/'), config.container_name),
            None => format!(
                "https://{}.blob.core.windows.net/{}",
                config.account_name, config.container_name
            ),
        };

        info!(
            "Created Azure backend for account: {}, container: {}",
            config.account_name, config.container_name
        );

        Ok(Self {
            store: Arc::new(store),
            endpoint,
        })
    }
}

#[async_trait]
impl BlobBackend for AzureBackend {
    async fn fetch(&self, name: &str) -> Result<VersionedBlob> {
        let path = Path::from(name);
        debug!("Azure GET: {}", path);

        // Payload, ETag and content type come back from the same request,
        // so the token is observed atomically with the data.
        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| classify("Azure GET", name, e))?;

        let version = result.meta.e_tag.clone().ok_or_else(|| {
            StorageError::Backend(format!("Azure GET returned no ETag for {}", name))
        })?;
        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| v.to_string());

        let data = result.bytes().await.map_err(|e| {
            StorageError::Backend(format!("Failed to read Azure response: {}", e))
        })?;

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
        debug!("Azure PUT: {} ({:?})", path, condition);

        let result = self
            .store
            .put_opts(
                &path,
                PutPayload::from_bytes(data),
                put_options(content_type, condition),
            )
            .await
            .map_err(|e| classify("Azure PUT", name, e))?;

        result.e_tag.ok_or_else(|| {
            StorageError::Backend(format!("Azure PUT returned no ETag for {}", name)).into()
        })
    }

    async fn remove(&self, name: &str, condition: &WriteCondition) -> Result<()> {
        let path = Path::from(name);
        debug!("Azure DELETE: {} ({:?})", path, condition);

        // object_store has no conditional delete; a match condition is
        // checked against a fresh head before the delete is issued.
        if let WriteCondition::IfMatch(expected) = condition {
            let meta = self
                .store
                .head(&path)
                .await
                .map_err(|e| classify("Azure HEAD", name, e))?;
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
            .map_err(|e| classify("Azure DELETE", name, e))?;
        Ok(())
    }

    async fn check(&self) -> Result<()> {
        debug!("Azure probe: {}", self.endpoint);

        self.store
            .list_with_delimiter(None)
            .await
            .map_err(|e| StorageError::Backend(format!("Azure probe failed: {}", e)))?;
        Ok(())
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: These tests require actual Azure storage to run
    // They are ignored by default

    #[tokio::test]
    #[ignore]
    async fn test_azure_backend_basic() {
        let config = AzureConfig {
            account_name: std::env::var("AZURE_STORAGE_ACCOUNT").unwrap(),
            container_name: "test-state".to_string(),
            account_key: std::env::var("AZURE_STORAGE_KEY").ok(),
            endpoint: None,
            client_id: None,
            tenant_id: None,
            client_secret: None,
            sas_token: None,
        };

        let backend = AzureBackend::new(config).unwrap();

        let data = Bytes::from("Hello, Azure!");
        let v1 = backend
            .store("test-key", data.clone(), None, &WriteCondition::None)
            .await
            .unwrap();

        let blob = backend.fetch("test-key").await.unwrap();
        assert_eq!(blob.data, data);
        assert_eq!(blob.version, v1);

        let err = backend
            .store("test-key", data.clone(), None, &WriteCondition::IfAbsent)
            .await
            .unwrap_err();
        assert!(err.is_version_conflict());

        backend
            .remove("test-key", &WriteCondition::IfMatch(v1))
            .await
            .unwrap();
        assert!(backend.fetch("test-key").await.unwrap_err().is_not_found());
    }
}
