use std::sync::Arc;

use service::catalog::{CatalogService, MediaUrls};

use crate::errors::JsonApiError;
use crate::extract::RequestOrigin;

/// Shared state handed to every catalog handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub media_prefix: Arc<str>,
}

impl AppState {
    pub fn new(catalog: CatalogService, media_prefix: &str) -> Self {
        Self { catalog, media_prefix: Arc::from(media_prefix) }
    }

    /// Media URL resolver for the origin the request came in on.
    pub fn media_urls(&self, origin: &RequestOrigin) -> Result<MediaUrls, JsonApiError> {
        Ok(MediaUrls::new(origin.as_str(), &self.media_prefix)?)
    }
}
