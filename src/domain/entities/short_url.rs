//! Short URL entity representing a slug to destination mapping.

use chrono::{DateTime, Utc};

/// A persisted short URL record.
///
/// The `(slug, original_url)` binding never changes once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub slug: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(slug: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            slug,
            original_url,
            created_at,
        }
    }
}

/// Input data for creating a new short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub slug: String,
    pub original_url: String,
}

impl NewShortUrl {
    pub fn new(slug: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            original_url: original_url.into(),
        }
    }

    /// Materializes the record with the given creation time.
    pub fn into_short_url(self, created_at: DateTime<Utc>) -> ShortUrl {
        ShortUrl::new(self.slug, self.original_url, created_at)
    }
}
