//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::error::StoreError;
use async_trait::async_trait;

/// Durable mapping from slug to original URL.
///
/// The store exclusively owns record persistence. There is no update or
/// delete operation: a record is written once and read many times.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortUrlRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Inserts a record only if no record exists for its slug.
    ///
    /// The existence check and the insert are a single atomic step: of two
    /// concurrent calls with the same slug, at most one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the slug is taken.
    /// Returns [`StoreError::Backend`] on storage failures.
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, StoreError>;

    /// Looks up the record bound to `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the slug was never created.
    /// Returns [`StoreError::Backend`] on storage failures.
    async fn get(&self, slug: &str) -> Result<ShortUrl, StoreError>;
}
