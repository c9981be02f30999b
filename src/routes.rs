//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /healthcheck` - Liveness probe
//! - `POST /shorturl`    - Create a short URL
//! - `GET  /{slug}`      - Redirect to the original URL
//!
//! Every route is wrapped in the request tracing middleware.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_handler))
        .route("/shorturl", post(shorten_handler))
        .route("/{slug}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}
