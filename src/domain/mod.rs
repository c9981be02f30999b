//! Domain layer containing business entities and the store contract.
//!
//! This module is independent of infrastructure and presentation concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`error`] - Store error taxonomy shared by every backend
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Slug allocation and retry live in [`crate::application::services`]

pub mod entities;
pub mod error;
pub mod repositories;

pub use error::StoreError;
