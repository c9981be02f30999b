//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{DynShortUrlService, ShortUrlService};
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::slug_generator::SlugSource;

#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<DynShortUrlService>,
}

impl AppState {
    pub fn new(short_url_service: Arc<DynShortUrlService>) -> Self {
        Self { short_url_service }
    }

    /// Builds state from a store and a slug source.
    pub fn from_parts(
        repository: Arc<dyn ShortUrlRepository>,
        slugs: Arc<dyn SlugSource>,
    ) -> Self {
        Self::new(Arc::new(ShortUrlService::new(repository, slugs)))
    }
}
