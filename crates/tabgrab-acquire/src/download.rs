use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use tabgrab_model::Asset;

use crate::client::Client;
use crate::error::AcquireError;

/// Stream a resolved asset into `out_dir`, overwriting any existing file
/// with the same name.
///
/// The body is written chunk by chunk so large exports never sit in memory,
/// and the file handle is scoped to this function so it closes on every
/// exit path. Returns the path of the written file.
pub async fn download(
    client: &Client,
    asset: &Asset,
    out_dir: &Path,
) -> Result<PathBuf, AcquireError> {
    fs::create_dir_all(out_dir)
        .await
        .map_err(|e| AcquireError::download(out_dir, e))?;

    let path = out_dir.join(&asset.filename);
    tracing::info!(url = %asset.url, path = %path.display(), "Downloading");

    let response = client.get(&asset.url).await?;

    let mut file = fs::File::create(&path)
        .await
        .map_err(|e| AcquireError::download(&path, e))?;

    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AcquireError::fetch(&asset.url, e))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| AcquireError::download(&path, e))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| AcquireError::download(&path, e))?;

    tracing::info!(path = %path.display(), bytes = written, "Saved tab");
    Ok(path)
}
