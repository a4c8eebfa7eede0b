//! CLI command implementations.

pub mod delete;
pub mod get;
pub mod ping;
pub mod set;

use anyhow::Result;
use blobstate_core::{BackendConfig, VersionedStateStore};

/// Open a store against the backend described by `url`.
pub fn open_store(url: &str) -> Result<VersionedStateStore> {
    let config = BackendConfig::from_url(url)?;
    Ok(VersionedStateStore::from_config(&config)?)
}
