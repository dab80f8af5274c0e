use se_bus::{BroadcastBus, ChannelHub, ChannelName, HubConfig};
use se_server::{AppState, RelayConfig, ShutdownCoordinator, build_router};

use std::path::PathBuf;

use axum_test::TestServer;

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub max_handles_per_channel: usize,
    pub channel_capacity: usize,
    pub send_buffer_size: usize,
    pub static_dir: Option<PathBuf>,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            max_handles_per_channel: 100,
            channel_capacity: 64,
            send_buffer_size: 16,
            static_dir: None,
        }
    }
}

impl TestServerConfig {
    /// Room for exactly `clients` listeners: relay connections or subscribers
    pub fn with_max_handles(clients: usize) -> Self {
        Self {
            max_handles_per_channel: clients,
            ..Default::default()
        }
    }

    pub fn with_static_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: Some(dir.into()),
            ..Default::default()
        }
    }
}

pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default())
}

pub fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let hub = ChannelHub::new(HubConfig {
        channel_capacity: config.channel_capacity,
        max_handles_per_channel: config.max_handles_per_channel,
        ..HubConfig::default()
    });

    let app_state = AppState {
        bus: BroadcastBus::new(hub, ChannelName::default()),
        shutdown: ShutdownCoordinator::new(),
        relay: RelayConfig {
            send_buffer_size: config.send_buffer_size,
        },
        static_dir: config.static_dir,
    };

    let server = TestServer::builder()
        .http_transport()
        .build(build_router(app_state.clone()))
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}
