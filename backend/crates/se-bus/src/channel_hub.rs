use crate::{
    BroadcastMessage, BusError, BusErrorResult, ChannelHandle, ChannelName, HandleId, HubConfig,
};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::{Arc, RwLock};

use error_location::ErrorLocation;
use tokio::sync::broadcast;

/// What actually travels through a channel: the message plus who sent it
#[derive(Debug, Clone)]
pub(crate) struct Envelope {
    pub(crate) origin: HandleId,
    pub(crate) message: Arc<BroadcastMessage>,
}

/// Process-wide registry of named broadcast channels.
///
/// Every handle opened on the same name shares one channel. The hub is the
/// only owner of each channel's sender, so dropping a channel (last handle
/// closed, or hub shutdown) ends reception for everyone on it.
pub struct ChannelHub {
    inner: Arc<RwLock<HubInner>>,
    config: HubConfig,
}

struct HubInner {
    channels: HashMap<ChannelName, NamedChannel>,
    closed: bool,
}

struct NamedChannel {
    sender: broadcast::Sender<Envelope>,
    handle_count: usize,
    listener_count: usize,
}

impl ChannelHub {
    pub fn new(config: HubConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HubInner {
                channels: HashMap::new(),
                closed: false,
            })),
            config,
        }
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Open a send-only handle. It never receives anything, including its
    /// own posts.
    #[track_caller]
    pub fn open(&self, name: &ChannelName) -> BusErrorResult<ChannelHandle> {
        let receiver = self.register(name, false)?;
        Ok(ChannelHandle::new(
            HandleId::new(),
            name.clone(),
            self.clone(),
            receiver,
        ))
    }

    /// Open a handle that receives every message other handles post after
    /// this call returns.
    #[track_caller]
    pub fn open_listening(&self, name: &ChannelName) -> BusErrorResult<ChannelHandle> {
        let receiver = self.register(name, true)?;
        Ok(ChannelHandle::new(
            HandleId::new(),
            name.clone(),
            self.clone(),
            receiver,
        ))
    }

    #[track_caller]
    fn register(
        &self,
        name: &ChannelName,
        listen: bool,
    ) -> BusErrorResult<Option<broadcast::Receiver<Envelope>>> {
        let mut inner = self.inner.write().map_err(|_| BusError::lock_poisoned())?;

        if inner.closed {
            return Err(BusError::hub_closed());
        }

        let existing_listeners = inner.channels.get(name).map(|c| c.listener_count);

        match existing_listeners {
            // Only listeners hold a slot, so publishing never competes with subscribers
            Some(count) if listen && count >= self.config.max_handles_per_channel => {
                log::warn!(
                    "Listener limit reached on channel {}: {}/{}",
                    name,
                    count,
                    self.config.max_handles_per_channel
                );
                return Err(BusError::HandleLimitExceeded {
                    channel: name.to_string(),
                    current: count,
                    max: self.config.max_handles_per_channel,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            None if inner.channels.len() >= self.config.max_channels => {
                log::warn!(
                    "Channel limit reached: {}/{}",
                    inner.channels.len(),
                    self.config.max_channels
                );
                return Err(BusError::ChannelLimitExceeded {
                    current: inner.channels.len(),
                    max: self.config.max_channels,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            _ => {}
        }

        let capacity = self.config.channel_capacity.max(1);
        let channel = inner.channels.entry(name.clone()).or_insert_with(|| {
            let (sender, _) = broadcast::channel(capacity);
            log::debug!("Created broadcast channel {}", name);
            NamedChannel {
                sender,
                handle_count: 0,
                listener_count: 0,
            }
        });

        channel.handle_count += 1;
        let receiver = if listen {
            channel.listener_count += 1;
            Some(channel.sender.subscribe())
        } else {
            None
        };

        log::debug!(
            "Opened {} handle on channel {} ({} open handles)",
            if listen { "listening" } else { "send-only" },
            name,
            channel.handle_count
        );

        Ok(receiver)
    }

    /// Drop one handle's claim on a channel, removing the channel when it
    /// was the last one.
    pub(crate) fn release(&self, name: &ChannelName, listening: bool) {
        let mut inner = match self.inner.write() {
            Ok(inner) => inner,
            Err(_) => {
                log::error!("Channel hub lock poisoned while closing handle on {}", name);
                return;
            }
        };

        if let Some(channel) = inner.channels.get_mut(name) {
            channel.handle_count = channel.handle_count.saturating_sub(1);
            if listening {
                channel.listener_count = channel.listener_count.saturating_sub(1);
            }

            log::debug!(
                "Closed handle on channel {} ({} remaining handles)",
                name,
                channel.handle_count
            );

            if channel.handle_count == 0 {
                inner.channels.remove(name);
                log::debug!("Removed empty broadcast channel {}", name);
            }
        }
    }

    /// Hand an envelope to every receiver on the channel. Returns the number
    /// of receivers the channel had at send time.
    #[track_caller]
    pub(crate) fn send(&self, name: &ChannelName, envelope: Envelope) -> BusErrorResult<usize> {
        let inner = self.inner.read().map_err(|_| BusError::lock_poisoned())?;

        if inner.closed {
            return Err(BusError::hub_closed());
        }

        let Some(channel) = inner.channels.get(name) else {
            return Err(BusError::hub_closed());
        };

        match channel.sender.send(envelope) {
            Ok(receiver_count) => Ok(receiver_count),
            // No receivers: fire-and-forget means the message is simply gone
            Err(_) => Ok(0),
        }
    }

    /// Close every channel. Listening handles observe the end of their
    /// stream and further opens fail.
    pub fn shutdown(&self) {
        match self.inner.write() {
            Ok(mut inner) => {
                inner.closed = true;
                let dropped = inner.channels.len();
                inner.channels.clear();
                log::info!("Channel hub shut down, closed {} channels", dropped);
            }
            Err(_) => log::error!("Channel hub lock poisoned during shutdown"),
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.read().map(|inner| inner.closed).unwrap_or(true)
    }

    /// Open handles on a channel
    pub fn handle_count(&self, name: &ChannelName) -> usize {
        self.inner
            .read()
            .ok()
            .and_then(|inner| inner.channels.get(name).map(|c| c.handle_count))
            .unwrap_or(0)
    }

    /// Listening handles open on a channel. Only these count against
    /// `max_handles_per_channel`.
    pub fn listener_count(&self, name: &ChannelName) -> usize {
        self.inner
            .read()
            .ok()
            .and_then(|inner| inner.channels.get(name).map(|c| c.listener_count))
            .unwrap_or(0)
    }

    pub fn active_channels(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|inner| inner.channels.keys().map(|name| name.to_string()).collect())
            .unwrap_or_default()
    }

    pub fn channel_count(&self) -> usize {
        self.inner
            .read()
            .map(|inner| inner.channels.len())
            .unwrap_or(0)
    }
}

impl Default for ChannelHub {
    fn default() -> Self {
        Self::new(HubConfig::default())
    }
}

impl Clone for ChannelHub {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config.clone(),
        }
    }
}
