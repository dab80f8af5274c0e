use axum_test::{TestServer, TestWebSocket};
use serde_json::Value;
use tokio::time::{Duration, timeout};

pub const RELAY_PATH: &str = "/ws/updates";

/// How long a test waits before deciding nothing is coming
pub const QUIET_PERIOD: Duration = Duration::from_millis(150);

pub struct RelayTestClient {
    ws: TestWebSocket,
}

impl RelayTestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server
            .get_websocket(RELAY_PATH)
            .await
            .into_websocket()
            .await;

        Self { ws }
    }

    pub async fn send_json(&mut self, value: &Value) {
        self.ws.send_text(value.to_string()).await;
    }

    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    pub async fn receive_json(&mut self) -> Value {
        let text = timeout(Duration::from_secs(2), self.ws.receive_text())
            .await
            .expect("timed out waiting for relay frame");
        serde_json::from_str(&text).expect("relay frame should be JSON")
    }

    /// True when no frame arrives within the quiet period
    pub async fn receives_nothing(&mut self) -> bool {
        timeout(QUIET_PERIOD, self.ws.receive_text()).await.is_err()
    }

    pub async fn close(self) {
        self.ws.close().await;
    }
}
