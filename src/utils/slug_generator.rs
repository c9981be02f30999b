//! Short slug generation.
//!
//! Slugs are six characters drawn independently and uniformly from
//! `[a-z0-9]`, giving 36^6 (about 2.18 billion) possible values. A single
//! draw does not guarantee uniqueness; the store rejects duplicates and the
//! caller re-draws (see [`crate::application::services::ShortUrlService`]).

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::Mutex;

/// Symbols a slug is built from.
pub const SLUG_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Number of characters in every generated slug.
pub const SLUG_LENGTH: usize = 6;

/// Source of candidate slugs.
///
/// The service depends on this trait rather than on a concrete generator so
/// that tests can script the exact sequence of candidates.
#[cfg_attr(test, mockall::automock)]
pub trait SlugSource: Send + Sync {
    /// Produces a candidate slug. Never fails.
    fn generate(&self) -> String;
}

/// Uniform random slug generator over [`SLUG_ALPHABET`].
///
/// Owns its randomness source instead of reaching for a process-wide one,
/// so a seeded generator yields a reproducible sequence.
///
/// # Examples
///
/// ```
/// use shorturl::utils::slug_generator::{SlugGenerator, SlugSource, is_valid_slug};
///
/// let generator = SlugGenerator::from_seed(7);
/// let slug = generator.generate();
/// assert!(is_valid_slug(&slug));
/// ```
#[derive(Debug)]
pub struct SlugGenerator<R = StdRng> {
    rng: Mutex<R>,
}

impl SlugGenerator<StdRng> {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a generator with a deterministic sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for SlugGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + Send> SlugGenerator<R> {
    /// Creates a generator drawing from the given randomness source.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<R: RngCore + Send> SlugSource for SlugGenerator<R> {
    fn generate(&self) -> String {
        // A panic while holding the lock cannot leave the RNG in a state that
        // matters for uniform sampling, so a poisoned lock is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        (0..SLUG_LENGTH)
            .map(|_| SLUG_ALPHABET[rng.random_range(0..SLUG_ALPHABET.len())] as char)
            .collect()
    }
}

/// Returns true if `slug` has the exact shape of a generated slug.
pub fn is_valid_slug(slug: &str) -> bool {
    slug.len() == SLUG_LENGTH && slug.bytes().all(|b| SLUG_ALPHABET.contains(&b))
}
