//! Short URL store implementations.
//!
//! # Repositories
//!
//! - [`PgShortUrlRepository`] - durable PostgreSQL store
//! - [`InMemoryShortUrlRepository`] - process-local store for development and tests
//!
//! [`pool`] builds the PostgreSQL connection pool and applies migrations.

pub mod memory_short_url_repository;
pub mod pg_short_url_repository;
pub mod pool;

pub use memory_short_url_repository::InMemoryShortUrlRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
pub use pool::connect_pg;
