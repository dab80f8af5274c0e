use crate::ShutdownCoordinator;

use se_bus::BroadcastBus;

use std::path::PathBuf;

const DEFAULT_SEND_BUFFER_SIZE: usize = 100;

/// Per-connection relay settings
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Outgoing frames buffered before the connection stops reading the bus
    pub send_buffer_size: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
        }
    }
}

impl From<&se_config::ServerConfig> for RelayConfig {
    fn from(config: &se_config::ServerConfig) -> Self {
        Self {
            send_buffer_size: config.send_buffer_size,
        }
    }
}

/// Shared state for every route
#[derive(Clone)]
pub struct AppState {
    pub bus: BroadcastBus,
    pub shutdown: ShutdownCoordinator,
    pub relay: RelayConfig,
    pub static_dir: Option<PathBuf>,
}
