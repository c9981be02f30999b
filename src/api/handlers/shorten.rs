//! Handler for short URL creation endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for the given destination.
///
/// # Endpoint
///
/// `POST /shorturl`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "slug": "k3x9qa", "url": "https://example.com" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or invalid.
/// Returns 503 Service Unavailable if no free slug was found within the retry bound.
/// Returns 500 Internal Server Error on storage failures.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let short_url = state
        .short_url_service
        .create_short_url(&payload.url)
        .await?;

    Ok((StatusCode::CREATED, Json(short_url.into())))
}
