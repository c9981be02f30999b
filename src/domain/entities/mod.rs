//! Core domain entities.
//!
//! Entities follow the "New Type" pattern with a separate struct for creation:
//! [`NewShortUrl`] carries what the caller supplies, [`ShortUrl`] is the
//! persisted record including store-assigned metadata.

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrl};
