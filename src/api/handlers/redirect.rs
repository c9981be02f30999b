//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::slug_generator::is_valid_slug;

/// Redirects a slug to its original URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// Slugs that cannot have been generated (wrong length or characters) are
/// answered with 404 without a store lookup.
///
/// # Errors
///
/// Returns 404 Not Found if the slug doesn't exist.
/// Returns 500 Internal Server Error on storage failures.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    if !is_valid_slug(&slug) {
        debug!("Rejected malformed slug {:?}", slug);
        return Err(AppError::not_found(
            "Short URL not found",
            json!({ "slug": slug }),
        ));
    }

    let short_url = state.short_url_service.resolve(&slug).await?;

    Ok(Redirect::temporary(&short_url.original_url))
}
