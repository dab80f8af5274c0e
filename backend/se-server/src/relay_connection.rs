use crate::{RelayConfig, ServerError, ServerErrorResult, ShutdownGuard};

use se_bus::{BroadcastMessage, BusError, ChannelHandle};

use std::sync::Arc;

use axum::extract::ws::{Message, Utf8Bytes, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

/// Bridges one WebSocket client onto the update channel.
///
/// The client owns a listening handle: its posts reach every other client and
/// in-process subscriber, and it receives everything they post, never its own.
pub struct RelayConnection {
    handle: ChannelHandle,
    config: RelayConfig,
}

impl RelayConnection {
    pub fn new(handle: ChannelHandle, config: RelayConfig) -> Self {
        Self { handle, config }
    }

    pub async fn handle(
        mut self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> ServerErrorResult<()> {
        log::info!(
            "Relay connection {} joined channel {}",
            self.handle.id(),
            self.handle.name()
        );

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Bounded so a slow client pushes back on this loop instead of growing memory
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size.max(1));

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Close(_))) | None => {
                            log::info!("Relay connection {} closed by client", self.handle.id());
                            break Ok(());
                        }
                        Some(Ok(msg)) => {
                            if let Err(e) = self.handle_client_message(msg, &tx).await {
                                break Err(e);
                            }
                        }
                        Some(Err(e)) => {
                            log::error!(
                                "WebSocket error on relay connection {}: {}",
                                self.handle.id(),
                                e
                            );
                            break Err(ServerError::connection_closed(format!("WebSocket error: {e}")));
                        }
                    }
                }

                incoming = self.handle.recv() => {
                    match incoming {
                        Ok(Some(message)) => {
                            if let Err(e) = self.forward(message, &tx).await {
                                break Err(e);
                            }
                        }
                        Ok(None) => {
                            log::info!(
                                "Channel {} closed, ending relay connection {}",
                                self.handle.name(),
                                self.handle.id()
                            );
                            break Ok(());
                        }
                        Err(BusError::Lagged { missed_count, .. }) => {
                            log::warn!(
                                "Relay connection {} lagged, missed {} messages",
                                self.handle.id(),
                                missed_count
                            );
                        }
                        Err(e) => {
                            log::warn!("Relay connection {}: {}", self.handle.id(), e);
                        }
                    }
                }

                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down relay connection {} gracefully", self.handle.id());
                    let _ = tx.send(Message::Close(None)).await;
                    break Ok(());
                }
            }
        };

        self.handle.close();
        drop(tx);
        let _ = send_task.await;

        log::info!("Relay connection {} closed", self.handle.id());

        result
    }

    async fn handle_client_message(
        &self,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> ServerErrorResult<()> {
        match msg {
            Message::Text(text) => {
                self.relay_text(text.as_str());
                Ok(())
            }
            Message::Binary(data) => {
                log::warn!(
                    "Ignoring {} byte binary frame from relay connection {}",
                    data.len(),
                    self.handle.id()
                );
                Ok(())
            }
            Message::Ping(data) => tx
                .send(Message::Pong(data))
                .await
                .map_err(|_| ServerError::connection_closed("send buffer closed")),
            Message::Pong(_) | Message::Close(_) => Ok(()),
        }
    }

    /// Post a client frame to the channel. Malformed frames are logged and
    /// dropped; they never close the connection.
    fn relay_text(&self, text: &str) {
        let message = serde_json::from_str(text)
            .map_err(BusError::from)
            .and_then(BroadcastMessage::from_value);

        let message = match message {
            Ok(message) => message,
            Err(e) => {
                log::warn!(
                    "Ignoring malformed frame from relay connection {}: {}",
                    self.handle.id(),
                    e
                );
                return;
            }
        };

        let event_type = message.event_type().to_owned();
        match self.handle.post(message) {
            Ok(receivers) => log::debug!(
                "Relayed {} from connection {} to {} listeners",
                event_type,
                self.handle.id(),
                receivers
            ),
            Err(e) => log::warn!(
                "Failed to relay {} from connection {}: {}",
                event_type,
                self.handle.id(),
                e
            ),
        }
    }

    async fn forward(
        &self,
        message: Arc<BroadcastMessage>,
        tx: &mpsc::Sender<Message>,
    ) -> ServerErrorResult<()> {
        let json = match message.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!(
                    "Failed to encode {} for relay connection {}: {}",
                    message.event_type(),
                    self.handle.id(),
                    e
                );
                return Ok(());
            }
        };

        tx.send(Message::Text(Utf8Bytes::from(json)))
            .await
            .map_err(|_| ServerError::connection_closed("send buffer closed"))
    }
}
