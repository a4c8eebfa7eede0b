use anyhow::{Context, Result};
use bytes::Bytes;
use std::io::Read;
use tracing::info;

use blobstate_core::{Concurrency, SetRequest, StateValue};

use super::open_store;

pub async fn run(
    url: &str,
    key: &str,
    value: Option<&str>,
    json: bool,
    etag: Option<String>,
    first_write: bool,
    content_type: Option<String>,
) -> Result<()> {
    let store = open_store(url)?;

    let raw = match value {
        Some(v) => v.as_bytes().to_vec(),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read value from stdin")?;
            buf
        }
    };

    let value = if json {
        let parsed: serde_json::Value =
            serde_json::from_slice(&raw).context("value is not valid JSON")?;
        StateValue::Json(parsed)
    } else {
        StateValue::Raw(Bytes::from(raw))
    };

    let mut request = SetRequest::new(key, value);
    if let Some(etag) = etag {
        request = request.with_version(etag);
    }
    if first_write {
        request = request.with_concurrency(Concurrency::FirstWrite);
    }
    if let Some(ct) = content_type {
        request = request.with_content_type(ct);
    }

    store.set(request).await?;
    info!("Stored {}", key);

    Ok(())
}
