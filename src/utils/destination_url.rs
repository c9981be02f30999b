//! Validation of destination URLs before they are stored.
//!
//! A stored URL is sent back verbatim as a `Location` header, so it has to
//! survive that trip unchanged. `url::Url::parse` silently drops tabs and
//! newlines and trims leading control characters, which means a string can
//! parse cleanly and still be unusable as a header value. Those characters
//! are rejected here instead of being normalized away.

use thiserror::Error;
use url::Url;

/// Reasons a destination URL is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DestinationUrlError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL must not contain whitespace or control characters")]
    ForbiddenCharacter,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must use http or https and include a host")]
    UnsupportedScheme,
}

/// Accepts only absolute `http`/`https` URLs with a host whose raw text
/// contains no whitespace or control characters.
///
/// # Errors
///
/// Returns the first [`DestinationUrlError`] that applies.
///
/// # Examples
///
/// ```
/// use shorturl::utils::destination_url::{DestinationUrlError, check_destination_url};
///
/// assert!(check_destination_url("https://example.com/a?b=c").is_ok());
/// assert_eq!(
///     check_destination_url("https://example.com/a\nb"),
///     Err(DestinationUrlError::ForbiddenCharacter)
/// );
/// ```
pub fn check_destination_url(input: &str) -> Result<(), DestinationUrlError> {
    if input.is_empty() {
        return Err(DestinationUrlError::Empty);
    }

    if input.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(DestinationUrlError::ForbiddenCharacter);
    }

    let url = Url::parse(input).map_err(|e| DestinationUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(()),
        _ => Err(DestinationUrlError::UnsupportedScheme),
    }
}
