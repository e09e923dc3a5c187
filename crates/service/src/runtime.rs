//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep the server crate importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Ensure the media root exists before `/media` is mounted.
pub async fn ensure_env(media_root: &str) -> anyhow::Result<()> {
    common::env::ensure_media_root(media_root).await
}
