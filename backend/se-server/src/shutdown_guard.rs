use crate::ShutdownCoordinator;

use tokio::sync::broadcast;

/// Per-task view of the shutdown signal
pub struct ShutdownGuard {
    coordinator: ShutdownCoordinator,
    shutdown_rx: broadcast::Receiver<()>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            coordinator: coordinator.clone(),
            shutdown_rx: coordinator.subscribe(),
        }
    }

    /// Resolves once shutdown has been signalled, immediately if it already
    /// was before this guard existed.
    pub async fn wait(&mut self) {
        if self.coordinator.is_shutdown() {
            return;
        }
        let _ = self.shutdown_rx.recv().await;
    }

    pub fn is_shutdown(&self) -> bool {
        self.coordinator.is_shutdown()
    }
}
