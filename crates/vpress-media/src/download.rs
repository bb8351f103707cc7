//! Remote file download.

use std::path::Path;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};

/// Download a remote URL to a local file, streaming to disk.
pub async fn download_to_file(
    client: &reqwest::Client,
    url: &str,
    dest: impl AsRef<Path>,
) -> MediaResult<()> {
    let dest = dest.as_ref();
    debug!("Downloading {} to {}", url, dest.display());

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(MediaError::download_failed(format!(
            "{} returned HTTP {}",
            url,
            response.status()
        )));
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;

    if written == 0 {
        return Err(MediaError::download_failed(format!("{} returned an empty body", url)));
    }

    info!("Downloaded {} bytes from {}", written, url);
    Ok(())
}
