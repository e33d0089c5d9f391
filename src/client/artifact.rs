//! Writing rendered PDFs to disk.

use std::path::Path;

use reqwest::Response;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use super::error::ClientError;

/// Stream a response body into `destination`, returning the number of bytes
/// written. A partially written file is removed if the stream fails.
pub(crate) async fn stream_to_file(
    mut resp: Response,
    destination: &Path,
) -> Result<u64, ClientError> {
    let mut file = File::create(destination)
        .await
        .map_err(|err| ClientError::io(destination, err))?;

    let mut written = 0_u64;
    let copied = async {
        while let Some(chunk) = resp.chunk().await? {
            file.write_all(&chunk)
                .await
                .map_err(|err| ClientError::io(destination, err))?;
            written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|err| ClientError::io(destination, err))
    }
    .await;

    if let Err(err) = copied {
        drop(file);
        let _ = fs::remove_file(destination).await;
        return Err(err);
    }
    Ok(written)
}

pub(crate) async fn write_bytes(destination: &Path, bytes: &[u8]) -> Result<u64, ClientError> {
    fs::write(destination, bytes)
        .await
        .map_err(|err| ClientError::io(destination, err))?;
    Ok(bytes.len() as u64)
}
