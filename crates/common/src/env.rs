//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::{info, warn};

/// Ensure the media root exists so `/media` has something to serve.
/// A missing directory is created; a path that exists but is not a
/// directory is an error.
pub async fn ensure_media_root(media_root: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(media_root).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("media root {media_root} is not a directory")),
        Err(_) => {
            warn!(%media_root, "media root not found; creating it, images will 404 until uploaded");
            tokio::fs::create_dir_all(media_root)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {media_root}: {e}"))?;
            info!(%media_root, "media root created");
            Ok(())
        }
    }
}
