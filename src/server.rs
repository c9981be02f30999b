//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, listener binding, and the task layout that ties
//! the server lifecycle to [`ShutdownCoordinator`]:
//!
//! - **listener task** serves requests until told to stop accepting
//! - **signal task** waits for SIGINT/SIGTERM/SIGQUIT and runs the shutdown sequence
//! - **main task** waits for the root token and returns

use crate::config::Config;
use crate::domain::repositories::ShortUrlRepository;
use crate::infrastructure::persistence::{
    InMemoryShortUrlRepository, PgShortUrlRepository, connect_pg,
};
use crate::routes::app_router;
use crate::shutdown::{SHUTDOWN_GRACE_PERIOD, ShutdownCoordinator, fatal, wait_for_signal};
use crate::state::AppState;
use crate::utils::slug_generator::SlugGenerator;

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Short URL store (PostgreSQL, or in-memory when no database is configured)
/// - Slug generator seeded from the OS
/// - Axum HTTP server with graceful shutdown on termination signals
///
/// Returns once the server has shut down within the grace period.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The listen address cannot be bound
pub async fn run(config: Config) -> Result<()> {
    let repository = connect_repository(&config).await?;
    let state = AppState::from_parts(repository, Arc::new(SlugGenerator::new()));
    let app = app_router(state);

    let listener = bind_listener(&config.listen_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    let coordinator = ShutdownCoordinator::new(SHUTDOWN_GRACE_PERIOD);
    spawn_listener(listener, app, coordinator.clone());
    spawn_signal_listener(coordinator.clone());

    tracing::info!("Server is ready to accept requests");

    coordinator.stopped().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Selects the store backend from configuration.
async fn connect_repository(config: &Config) -> Result<Arc<dyn ShortUrlRepository>> {
    if config.database_url.is_some() {
        let pool = connect_pg(config).await?;
        tracing::info!("Store: PostgreSQL");
        Ok(Arc::new(PgShortUrlRepository::new(Arc::new(pool))))
    } else {
        tracing::warn!("No database configured. Using in-memory store; data is not durable.");
        Ok(Arc::new(InMemoryShortUrlRepository::new()))
    }
}

/// Binds the TCP listener on exactly `addr`.
///
/// # Errors
///
/// Returns an error if the address is invalid or already in use. There is
/// no fallback to another port.
pub async fn bind_listener(addr: &str) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind listener on {addr}"))
}

/// Serves `app` on `listener` until the coordinator stops accepting.
///
/// The listener is marked stopped once every connection has drained. A
/// serve error terminates the process.
pub fn spawn_listener(
    listener: TcpListener,
    app: Router,
    coordinator: ShutdownCoordinator,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(coordinator.stop_accepting_signal())
            .await;

        match result {
            Ok(()) => {
                tracing::info!("Listener stopped");
                coordinator.mark_listener_stopped();
            }
            Err(e) => fatal(format_args!("HTTP server error: {e}")),
        }
    })
}

/// Runs the shutdown sequence on the first termination signal.
///
/// Exceeding the grace period, or failing to install signal handlers,
/// terminates the process.
pub fn spawn_signal_listener(coordinator: ShutdownCoordinator) -> JoinHandle<()> {
    tokio::spawn(async move {
        let signal = match wait_for_signal().await {
            Ok(signal) => signal,
            Err(e) => fatal(format_args!("Failed to install signal handlers: {e}")),
        };
        tracing::info!(signal, "Got kill signal, shutting down");

        if let Err(e) = coordinator.shutdown().await {
            fatal(e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_listener_ephemeral_port() {
        let listener = bind_listener("127.0.0.1:0").await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_listener_invalid_address() {
        assert!(bind_listener("not an address").await.is_err());
    }

    #[tokio::test]
    async fn test_in_memory_store_without_database() {
        let config = Config {
            database_url: None,
            ..Config::default()
        };

        let repository = connect_repository(&config).await.unwrap();
        assert!(repository.get("abc123").await.is_err());
    }
}
