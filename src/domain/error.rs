//! Errors reported by short URL stores.

use thiserror::Error;

/// Failure kinds of a [`crate::domain::repositories::ShortUrlRepository`].
///
/// Every backend reports the same three kinds so callers can tell an
/// expected collision apart from a missing record or a durability fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record is already bound to this slug.
    #[error("short URL '{0}' already exists")]
    AlreadyExists(String),

    /// No record is bound to this slug.
    #[error("short URL '{0}' not found")]
    NotFound(String),

    /// The durability layer failed (I/O error, lost connection, ...).
    #[error("storage backend failure: {0}")]
    Backend(String),
}
