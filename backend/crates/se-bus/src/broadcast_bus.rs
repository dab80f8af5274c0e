use crate::{
    BroadcastMessage, BusErrorResult, ChannelHandle, ChannelHub, ChannelName, MessageCallback,
    Payload, PublishOutcome, Subscription, SubscriptionFilter, UpdateBus,
};

/// `UpdateBus` backed by a named channel on a `ChannelHub`.
///
/// Clones share the hub, so every clone publishes to and subscribes on the
/// same channel.
#[derive(Clone, Default)]
pub struct BroadcastBus {
    hub: ChannelHub,
    channel: ChannelName,
}

impl BroadcastBus {
    pub fn new(hub: ChannelHub, channel: ChannelName) -> Self {
        Self { hub, channel }
    }

    pub fn hub(&self) -> &ChannelHub {
        &self.hub
    }

    pub fn channel(&self) -> &ChannelName {
        &self.channel
    }

    /// Open a listening handle for consumers that pull messages themselves.
    /// Posts through this handle reach every other subscriber but not itself.
    pub fn listen(&self) -> BusErrorResult<ChannelHandle> {
        self.hub.open_listening(&self.channel)
    }

    /// Publish an already-built message (best-effort)
    pub fn publish_message(&self, message: BroadcastMessage) -> PublishOutcome {
        let event_type = message.event_type().to_string();

        match self.try_publish(message) {
            Ok(receivers) => {
                log::debug!(
                    "Published {} on {} ({} receivers)",
                    event_type,
                    self.channel,
                    receivers
                );
                PublishOutcome::from_receiver_count(receivers)
            }
            Err(e) => {
                log::error!(
                    "Failed to publish {} on {}: {}",
                    event_type,
                    self.channel,
                    e
                );
                PublishOutcome::Failed {
                    reason: e.error_code(),
                }
            }
        }
    }

    /// Open a send-only handle, post once and close it again, so the
    /// sending handle never lingers and never hears its own message.
    fn try_publish(&self, message: BroadcastMessage) -> BusErrorResult<usize> {
        let mut handle = self.hub.open(&self.channel)?;
        let result = handle.post(message);
        handle.close();
        result
    }

    fn try_subscribe(
        &self,
        filter: SubscriptionFilter,
        callback: MessageCallback,
    ) -> BusErrorResult<Subscription> {
        let handle = self.hub.open_listening(&self.channel)?;
        Subscription::spawn(handle, filter, callback)
    }
}

impl UpdateBus for BroadcastBus {
    fn publish(&self, event_type: &str, payload: Payload) -> PublishOutcome {
        self.publish_message(BroadcastMessage::new(event_type, payload))
    }

    fn subscribe_filtered(
        &self,
        filter: SubscriptionFilter,
        callback: MessageCallback,
    ) -> Subscription {
        match self.try_subscribe(filter, callback) {
            Ok(subscription) => {
                log::debug!("Subscribed to {}", self.channel);
                subscription
            }
            Err(e) => {
                log::error!("Failed to subscribe to {}: {}", self.channel, e);
                Subscription::noop()
            }
        }
    }
}
