//! Handler for health check endpoint.

/// Liveness probe.
///
/// # Endpoint
///
/// `GET /healthcheck`
///
/// Always answers `200 OK` with body `OK`; the store is not consulted.
pub async fn health_handler() -> &'static str {
    "OK"
}
