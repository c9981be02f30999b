//! DTOs for the short URL creation endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::ShortUrl;
use crate::utils::destination_url::check_destination_url;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The destination URL (absolute `http` or `https`).
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    #[validate(custom(function = "validate_http_url"))]
    pub url: String,
}

/// Response for a created short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub slug: String,
    pub url: String,
}

impl From<ShortUrl> for ShortenResponse {
    fn from(short_url: ShortUrl) -> Self {
        Self {
            slug: short_url.slug,
            url: short_url.original_url,
        }
    }
}

/// Validator hook for [`check_destination_url`].
fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    check_destination_url(value)
        .map_err(|e| ValidationError::new("url").with_message(e.to_string().into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> ShortenRequest {
        ShortenRequest {
            url: url.to_string(),
        }
    }

    #[test]
    fn test_valid_urls() {
        assert!(request("https://example.com").validate().is_ok());
        assert!(request("http://example.com/path?q=1#frag").validate().is_ok());
    }

    #[test]
    fn test_invalid_urls() {
        assert!(request("").validate().is_err());
        assert!(request("not-a-url").validate().is_err());
        assert!(request("ftp://example.com/file").validate().is_err());
        assert!(request("mailto:someone@example.com").validate().is_err());
        assert!(request("https://example.com/a\nb").validate().is_err());
    }

    #[test]
    fn test_overlong_url_rejected() {
        let url = format!("https://example.com/{}", "a".repeat(2048));
        assert!(request(&url).validate().is_err());
    }
}
