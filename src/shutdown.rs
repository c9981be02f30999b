//! Graceful shutdown coordination.
//!
//! Shutdown moves through [`ShutdownPhase`]:
//!
//! ```text
//! Running -> ShuttingDown -> Stopped
//!                        \-> Failed    (grace period elapsed)
//! ```
//!
//! The listener is first told to stop accepting connections, then given
//! [`SHUTDOWN_GRACE_PERIOD`] to drain in-flight requests. Completion cancels
//! the root token that the main task waits on. Running out of time is
//! reported as [`ShutdownError::DeadlineExceeded`]; the binary treats it as
//! fatal rather than retrying.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

/// Time allowed for in-flight requests to finish once shutdown starts.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Lifecycle of the server process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    Running,
    ShuttingDown,
    Stopped,
    Failed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShutdownError {
    #[error("shutdown deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    #[error("shutdown already initiated")]
    AlreadyInitiated,
}

/// Coordinates listener draining and process-level cancellation.
///
/// Cloning is cheap; all clones observe the same state.
#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
    grace_period: Duration,
    stop_accepting: CancellationToken,
    listener_stopped: CancellationToken,
    root: CancellationToken,
    phase: Arc<watch::Sender<ShutdownPhase>>,
}

impl ShutdownCoordinator {
    pub fn new(grace_period: Duration) -> Self {
        let (phase, _) = watch::channel(ShutdownPhase::Running);
        Self {
            grace_period,
            stop_accepting: CancellationToken::new(),
            listener_stopped: CancellationToken::new(),
            root: CancellationToken::new(),
            phase: Arc::new(phase),
        }
    }

    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }

    pub fn phase(&self) -> ShutdownPhase {
        *self.phase.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ShutdownPhase> {
        self.phase.subscribe()
    }

    /// Future that resolves when the listener must stop accepting
    /// connections. Pass it to `with_graceful_shutdown`.
    pub fn stop_accepting_signal(&self) -> WaitForCancellationFutureOwned {
        self.stop_accepting.clone().cancelled_owned()
    }

    /// Reports that the listener has closed and drained its connections.
    pub fn mark_listener_stopped(&self) {
        self.listener_stopped.cancel();
    }

    /// Resolves once shutdown completed within the grace period.
    pub async fn stopped(&self) {
        self.root.cancelled().await;
    }

    pub fn is_stopped(&self) -> bool {
        self.root.is_cancelled()
    }

    /// Runs the shutdown sequence once.
    ///
    /// Stops new connections, then waits at most the grace period for the
    /// listener to report completion. The deadline starts when this is
    /// called and is never extended.
    ///
    /// # Errors
    ///
    /// Returns [`ShutdownError::DeadlineExceeded`] if the listener did not
    /// finish in time; the phase becomes [`ShutdownPhase::Failed`] and the
    /// root token stays uncancelled.
    /// Returns [`ShutdownError::AlreadyInitiated`] on every call after the first.
    pub async fn shutdown(&self) -> Result<(), ShutdownError> {
        let started = self.phase.send_if_modified(|phase| {
            if *phase == ShutdownPhase::Running {
                *phase = ShutdownPhase::ShuttingDown;
                true
            } else {
                false
            }
        });
        if !started {
            return Err(ShutdownError::AlreadyInitiated);
        }

        tracing::info!(grace_period = ?self.grace_period, "Stopping listener");
        self.stop_accepting.cancel();

        match tokio::time::timeout(self.grace_period, self.listener_stopped.cancelled()).await {
            Ok(()) => {
                self.phase.send_replace(ShutdownPhase::Stopped);
                self.root.cancel();
                tracing::info!("Server shutting down");
                Ok(())
            }
            Err(_) => {
                self.phase.send_replace(ShutdownPhase::Failed);
                Err(ShutdownError::DeadlineExceeded(self.grace_period))
            }
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new(SHUTDOWN_GRACE_PERIOD)
    }
}

/// Waits for SIGINT, SIGTERM or SIGQUIT.
///
/// Returns the name of the signal that was received.
///
/// # Errors
///
/// Returns an error if a signal handler cannot be registered.
#[cfg(unix)]
pub async fn wait_for_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    let name = tokio::select! {
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
        _ = sigquit.recv() => "SIGQUIT",
    };

    Ok(name)
}

#[cfg(not(unix))]
pub async fn wait_for_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("Ctrl+C")
}

/// Logs `reason` and terminates the process with status 1.
pub fn fatal(reason: impl Display) -> ! {
    tracing::error!("Fatal: {}", reason);
    std::process::exit(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    /// Simulates a listener that needs `drain` to finish after being told to stop.
    fn spawn_fake_listener(coordinator: &ShutdownCoordinator, drain: Duration) {
        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            coordinator.stop_accepting_signal().await;
            tokio::time::sleep(drain).await;
            coordinator.mark_listener_stopped();
        });
    }

    #[tokio::test]
    async fn test_initial_phase_is_running() {
        let coordinator = ShutdownCoordinator::default();

        assert_eq!(coordinator.phase(), ShutdownPhase::Running);
        assert_eq!(coordinator.grace_period(), SHUTDOWN_GRACE_PERIOD);
        assert!(!coordinator.is_stopped());
    }

    #[tokio::test]
    async fn test_shutdown_within_grace_period() {
        let coordinator = ShutdownCoordinator::new(Duration::from_secs(2));
        spawn_fake_listener(&coordinator, Duration::from_millis(50));

        coordinator.shutdown().await.unwrap();

        assert_eq!(coordinator.phase(), ShutdownPhase::Stopped);
        assert!(coordinator.is_stopped());
        tokio::time::timeout(Duration::from_millis(100), coordinator.stopped())
            .await
            .expect("root token should be cancelled");
    }

    #[tokio::test]
    async fn test_shutdown_deadline_exceeded() {
        let grace = Duration::from_millis(100);
        let coordinator = ShutdownCoordinator::new(grace);
        spawn_fake_listener(&coordinator, Duration::from_secs(10));

        let started = Instant::now();
        let err = coordinator.shutdown().await.unwrap_err();

        assert_eq!(err, ShutdownError::DeadlineExceeded(grace));
        assert!(started.elapsed() >= grace);
        assert_eq!(coordinator.phase(), ShutdownPhase::Failed);
        assert!(!coordinator.is_stopped());
    }

    #[tokio::test]
    async fn test_stop_accepting_precedes_wait() {
        let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
        let signal = coordinator.stop_accepting_signal();

        let waiter = coordinator.clone();
        let shutdown = tokio::spawn(async move { waiter.shutdown().await });

        tokio::time::timeout(Duration::from_millis(500), signal)
            .await
            .expect("listener should be told to stop before the drain wait");
        assert_eq!(coordinator.phase(), ShutdownPhase::ShuttingDown);

        coordinator.mark_listener_stopped();
        shutdown.await.unwrap().unwrap();
        assert_eq!(coordinator.phase(), ShutdownPhase::Stopped);
    }

    #[tokio::test]
    async fn test_second_shutdown_is_rejected() {
        let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
        coordinator.mark_listener_stopped();

        coordinator.shutdown().await.unwrap();
        assert_eq!(
            coordinator.shutdown().await,
            Err(ShutdownError::AlreadyInitiated)
        );
        assert_eq!(coordinator.phase(), ShutdownPhase::Stopped);
    }

    #[tokio::test]
    async fn test_subscribers_observe_transitions() {
        let coordinator = ShutdownCoordinator::new(Duration::from_secs(1));
        let mut rx = coordinator.subscribe();
        spawn_fake_listener(&coordinator, Duration::from_millis(10));

        coordinator.shutdown().await.unwrap();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ShutdownPhase::Stopped);
    }
}
