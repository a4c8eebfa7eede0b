use anyhow::Result;
use tracing::info;

use super::open_store;

pub async fn run(url: &str) -> Result<()> {
    let store = open_store(url)?;
    store.ping().await?;
    info!("Storage backend is reachable");
    Ok(())
}
