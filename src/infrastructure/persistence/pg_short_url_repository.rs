//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::StoreError;
use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::db_error::is_unique_violation_on_slug;

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    slug: String,
    original_url: String,
    created_at: DateTime<Utc>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl::new(row.slug, row.original_url, row.created_at)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

/// PostgreSQL repository for short URL storage and retrieval.
///
/// Uniqueness is the primary key on `short_urls.slug`: a single `INSERT`
/// either claims the slug or fails with a unique violation, so concurrent
/// creates of the same slug cannot both succeed.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, StoreError> {
        let result = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO short_urls (slug, original_url)
            VALUES ($1, $2)
            RETURNING slug, original_url, created_at
            "#,
        )
        .bind(&new_short_url.slug)
        .bind(&new_short_url.original_url)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation_on_slug(&e) => {
                Err(StoreError::AlreadyExists(new_short_url.slug))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, slug: &str) -> Result<ShortUrl, StoreError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT slug, original_url, created_at
            FROM short_urls
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))
    }
}
