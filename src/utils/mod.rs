//! Utility functions shared across layers.
//!
//! - [`slug_generator`] - Random slug generation and shape validation
//! - [`db_error`] - Classification of PostgreSQL errors
//! - [`destination_url`] - Checks applied to URLs before they are stored

pub mod db_error;
pub mod destination_url;
pub mod slug_generator;
