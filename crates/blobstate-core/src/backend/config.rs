//! Backend configuration types.

use serde::{Deserialize, Serialize};

/// Storage backend configuration using tagged enum for type-safe configuration.
///
/// Supports two backends:
/// - Azure Blob Storage
/// - In-memory (for testing)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend")]
pub enum BackendConfig {
    /// Azure Blob Storage
    #[serde(rename = "azure")]
    Azure {
        /// Azure storage account name
        account_name: String,
        /// Azure blob container name
        container_name: String,
        /// Storage account key (if None, uses DefaultAzureCredential chain)
        #[serde(default)]
        account_key: Option<String>,
        /// Custom endpoint URL for sovereign clouds
        #[serde(default)]
        endpoint: Option<String>,
        /// Azure AD client ID (for service principal authentication)
        #[serde(default)]
        client_id: Option<String>,
        /// Azure AD tenant ID (for service principal authentication)
        #[serde(default)]
        tenant_id: Option<String>,
        /// Client secret (for service principal authentication)
        #[serde(default)]
        client_secret: Option<String>,
        /// SAS token for shared access signature authentication
        #[serde(default)]
        sas_token: Option<String>,
    },

    /// In-memory storage (for testing)
    #[serde(rename = "memory")]
    Memory,
}

impl BackendConfig {
    /// Parse configuration from a URL string
    ///
    /// Supported URL formats:
    /// - `azure://container@account.blob.core.windows.net`
    /// - `azure://container@account`
    /// - `memory://`
    pub fn from_url(url: &str) -> crate::Result<Self> {
        let parsed = url::Url::parse(url)
            .map_err(|e| crate::Error::Config(format!("Invalid storage URL: {}", e)))?;

        match parsed.scheme() {
            "azure" | "az" => {
                let host = parsed.host_str().unwrap_or_default();
                let account_name = host.split('.').next().unwrap_or(host).to_string();
                let container_name = parsed.username().to_string();

                if account_name.is_empty() || container_name.is_empty() {
                    return Err(crate::Error::Config(format!(
                        "Azure URL must be of form azure://container@account, got: {}",
                        url
                    )));
                }

                Ok(Self::Azure {
                    account_name,
                    container_name,
                    account_key: std::env::var("AZURE_STORAGE_KEY").ok(),
                    endpoint: None,
                    client_id: None,
                    tenant_id: None,
                    client_secret: None,
                    sas_token: None,
                })
            }
            "memory" => Ok(Self::Memory),
            scheme => Err(crate::Error::Config(format!(
                "Unknown storage scheme: {}",
                scheme
            ))),
        }
    }
}
