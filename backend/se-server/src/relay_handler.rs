use crate::{AppState, RelayConnection};

use se_bus::ChannelHandle;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
};
use tracing::Instrument;

/// GET /ws/updates
///
/// The channel handle is opened before upgrading so a full channel answers
/// 503 instead of accepting and immediately closing.
pub async fn handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let handle = state.bus.listen().map_err(|e| {
        log::warn!("Refusing relay connection: {}", e);
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    log::debug!("Accepted relay connection {}", handle.id());

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, handle, state)))
}

async fn handle_socket(socket: WebSocket, handle: ChannelHandle, state: AppState) {
    let connection_id = handle.id();
    let span = tracing::info_span!("relay", connection = %connection_id);
    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = RelayConnection::new(handle, state.relay.clone());

    if let Err(e) = connection
        .handle(socket, shutdown_guard)
        .instrument(span)
        .await
    {
        log::error!("Relay connection {connection_id} error: {e}");
    }
}
