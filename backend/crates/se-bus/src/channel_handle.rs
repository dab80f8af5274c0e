use crate::channel_hub::Envelope;
use crate::{BroadcastMessage, BusError, BusErrorResult, ChannelHub, ChannelName, HandleId};

use std::panic::Location;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use error_location::ErrorLocation;
use tokio::sync::broadcast::{self, error::RecvError};

/// A handle's claim on a hub channel. Released exactly once.
pub(crate) struct Registration {
    hub: ChannelHub,
    name: ChannelName,
    listening: bool,
    released: AtomicBool,
}

impl Registration {
    pub(crate) fn release(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            self.hub.release(&self.name, self.listening);
        }
    }

    pub(crate) fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release();
    }
}

/// One open endpoint on a named channel.
///
/// Posts reach every other listening handle on the same channel, never this
/// one. Dropping the handle closes it.
pub struct ChannelHandle {
    id: HandleId,
    name: ChannelName,
    registration: Arc<Registration>,
    receiver: Option<broadcast::Receiver<Envelope>>,
}

impl ChannelHandle {
    pub(crate) fn new(
        id: HandleId,
        name: ChannelName,
        hub: ChannelHub,
        receiver: Option<broadcast::Receiver<Envelope>>,
    ) -> Self {
        let registration = Arc::new(Registration {
            hub,
            name: name.clone(),
            listening: receiver.is_some(),
            released: AtomicBool::new(false),
        });

        Self {
            id,
            name,
            registration,
            receiver,
        }
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn name(&self) -> &ChannelName {
        &self.name
    }

    pub fn is_listening(&self) -> bool {
        self.receiver.is_some() && !self.is_closed()
    }

    pub fn is_closed(&self) -> bool {
        self.registration.is_released()
    }

    pub(crate) fn registration(&self) -> Arc<Registration> {
        Arc::clone(&self.registration)
    }

    /// Send a message to the other handles on this channel.
    /// Returns how many of them were listening.
    #[track_caller]
    pub fn post(&self, message: BroadcastMessage) -> BusErrorResult<usize> {
        if self.is_closed() {
            return Err(BusError::invalid_message(format!(
                "handle {} on channel {} is closed",
                self.id, self.name
            )));
        }

        let envelope = Envelope {
            origin: self.id,
            message: Arc::new(message),
        };

        let receivers = self.registration.hub.send(&self.name, envelope)?;

        // Our own receiver is counted by the channel but filtered on receipt
        Ok(if self.receiver.is_some() {
            receivers.saturating_sub(1)
        } else {
            receivers
        })
    }

    /// Wait for the next message from another handle.
    ///
    /// `Ok(None)` means the stream is over: the handle is send-only or
    /// closed, or the channel was shut down. A lagged receiver gets
    /// `BusError::Lagged` and can keep receiving afterwards.
    pub async fn recv(&mut self) -> BusErrorResult<Option<Arc<BroadcastMessage>>> {
        if self.registration.is_released() {
            return Ok(None);
        }

        let Some(receiver) = self.receiver.as_mut() else {
            return Ok(None);
        };

        loop {
            match receiver.recv().await {
                Ok(envelope) if envelope.origin == self.id => continue,
                Ok(envelope) => return Ok(Some(envelope.message)),
                Err(RecvError::Closed) => return Ok(None),
                Err(RecvError::Lagged(missed_count)) => {
                    return Err(BusError::Lagged {
                        missed_count,
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            }
        }
    }

    /// Release the channel. Safe to call more than once.
    pub fn close(&mut self) {
        self.receiver = None;
        self.registration.release();
    }
}

impl Drop for ChannelHandle {
    fn drop(&mut self) {
        self.registration.release();
    }
}

impl std::fmt::Debug for ChannelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("listening", &self.is_listening())
            .finish()
    }
}
