//! In-memory implementation of the short URL repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::StoreError;
use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;

/// Process-local short URL store backed by a [`DashMap`].
///
/// `create` goes through the entry API, which holds the shard lock across
/// the existence check and the insert. Slugs in different shards and all
/// reads proceed without waiting on each other.
///
/// Records do not survive a restart.
#[derive(Debug, Default)]
pub struct InMemoryShortUrlRepository {
    storage: DashMap<String, ShortUrl>,
}

impl InMemoryShortUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, StoreError> {
        match self.storage.entry(new_short_url.slug.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(new_short_url.slug)),
            Entry::Vacant(vacant) => {
                let record = new_short_url.into_short_url(Utc::now());
                vacant.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn get(&self, slug: &str) -> Result<ShortUrl, StoreError> {
        self.storage
            .get(slug)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))
    }
}
