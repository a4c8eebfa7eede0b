use anyhow::Result;
use std::io::Write;
use tracing::info;

use super::open_store;

pub async fn run(url: &str, key: &str) -> Result<()> {
    let store = open_store(url)?;

    match store.get(key).await? {
        Some(entry) => {
            info!(
                "Found {}: version {}, content type {}",
                key,
                entry.version,
                entry.content_type.as_deref().unwrap_or("unset")
            );
            std::io::stdout().write_all(&entry.data)?;
        }
        None => {
            info!("Key not found: {}", key);
        }
    }

    Ok(())
}
