use anyhow::Result;
use tracing::info;

use blobstate_core::DeleteRequest;

use super::open_store;

pub async fn run(url: &str, key: &str, etag: Option<String>) -> Result<()> {
    let store = open_store(url)?;

    let mut request = DeleteRequest::new(key);
    if let Some(etag) = etag {
        request = request.with_version(etag);
    }

    store.delete(request).await?;
    info!("Deleted {}", key);

    Ok(())
}
