//! Short URL creation and resolution service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::StoreError;
use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::destination_url::check_destination_url;
use crate::utils::slug_generator::SlugSource;

/// Upper bound on slug draws for a single create request.
pub const MAX_SLUG_ATTEMPTS: usize = 5;

/// Service type shared through [`crate::state::AppState`].
pub type DynShortUrlService = ShortUrlService<dyn ShortUrlRepository, dyn SlugSource>;

/// Service for creating and resolving short URLs.
///
/// Combines a [`SlugSource`] with a [`ShortUrlRepository`]. The generator
/// does not guarantee uniqueness; the store does, and this service re-draws
/// whenever the store reports a collision.
pub struct ShortUrlService<R: ShortUrlRepository + ?Sized, S: SlugSource + ?Sized> {
    repository: Arc<R>,
    slugs: Arc<S>,
}

impl<R: ShortUrlRepository + ?Sized, S: SlugSource + ?Sized> ShortUrlService<R, S> {
    /// Creates a new short URL service.
    pub fn new(repository: Arc<R>, slugs: Arc<S>) -> Self {
        Self { repository, slugs }
    }

    /// Stores `original_url` under a freshly drawn slug.
    ///
    /// # Collision Handling
    ///
    /// Each attempt draws a slug and asks the store to insert it. If the
    /// store reports [`StoreError::AlreadyExists`] a new slug is drawn, up to
    /// [`MAX_SLUG_ATTEMPTS`] draws in total. Existing records are never
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty, is not an absolute
    /// `http`/`https` URL, or contains whitespace or control characters.
    /// Returns [`AppError::SlugsExhausted`] if every draw collided.
    /// Returns [`AppError::Internal`] on storage failures.
    pub async fn create_short_url(&self, original_url: &str) -> Result<ShortUrl, AppError> {
        let original_url = original_url.trim();
        check_destination_url(original_url)
            .map_err(|e| AppError::bad_request(e.to_string(), json!({ "field": "url" })))?;

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = self.slugs.generate();

            match self
                .repository
                .create(NewShortUrl::new(slug, original_url))
                .await
            {
                Ok(short_url) => {
                    tracing::info!(slug = %short_url.slug, attempt, "Short URL created");
                    return Ok(short_url);
                }
                Err(StoreError::AlreadyExists(slug)) => {
                    tracing::debug!(%slug, attempt, "Slug collision, drawing again");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(
            attempts = MAX_SLUG_ATTEMPTS,
            "Failed to allocate a unique slug"
        );
        Err(AppError::SlugsExhausted {
            attempts: MAX_SLUG_ATTEMPTS,
        })
    }

    /// Retrieves the record bound to `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists for the slug.
    /// Returns [`AppError::Internal`] on storage failures.
    pub async fn resolve(&self, slug: &str) -> Result<ShortUrl, AppError> {
        Ok(self.repository.get(slug).await?)
    }
}
