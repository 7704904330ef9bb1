//! Stop signal for the task server.
//!
//! One [`ShutdownCoordinator`] belongs to each [`TaskServer`](crate::TaskServer).
//! Stopping it ends `serve` once in-flight requests finish. Stopping twice
//! is harmless.

use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};
use tracing::info;

/// Stop switch shared between the listener and whoever ends it.
#[derive(Default)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    /// A switch that has not been flipped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves once the server is told to stop.
    pub fn stopped(&self) -> WaitForCancellationFutureOwned {
        self.token.clone().cancelled_owned()
    }

    /// Tell the server to stop accepting connections.
    pub fn shutdown(&self) {
        if !self.token.is_cancelled() {
            info!("task server shutdown requested");
        }
        self.token.cancel();
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shutting_down(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Stop the server on Ctrl-C. Needs a running tokio runtime.
    pub fn shutdown_on_ctrl_c(&self) {
        let token = self.token.clone();
        let _ = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("ctrl-c received");
                token.cancel();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn starts_running() {
        assert!(!ShutdownCoordinator::new().is_shutting_down());
    }

    #[tokio::test]
    async fn stopped_resolves_after_shutdown() {
        let coord = ShutdownCoordinator::new();
        let stopped = coord.stopped();
        coord.shutdown();
        tokio::time::timeout(Duration::from_secs(1), stopped)
            .await
            .unwrap();
        assert!(coord.is_shutting_down());
    }

    #[tokio::test]
    async fn stopped_pends_while_running() {
        let coord = ShutdownCoordinator::new();
        let result = tokio::time::timeout(Duration::from_millis(20), coord.stopped()).await;
        assert!(result.is_err());
    }

    #[test]
    fn repeated_shutdown_is_harmless() {
        let coord = ShutdownCoordinator::new();
        coord.shutdown();
        coord.shutdown();
        assert!(coord.is_shutting_down());
    }

    #[tokio::test]
    async fn ctrl_c_listener_does_not_stop_by_itself() {
        let coord = ShutdownCoordinator::new();
        coord.shutdown_on_ctrl_c();
        tokio::task::yield_now().await;
        assert!(!coord.is_shutting_down());
    }
}
