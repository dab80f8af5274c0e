use crate::broadcast_message::payload_from;
use crate::{MessageCallback, Payload, PublishOutcome, Subscription, SubscriptionFilter};

use serde::Serialize;

/// Publish/subscribe surface for entity update notifications.
///
/// Both operations are best-effort: failures are logged and never returned
/// to the caller, so a lost notification cannot break the action that
/// triggered it. Construct one bus per process and pass it by reference.
pub trait UpdateBus: Send + Sync {
    /// Send `{type, timestamp, ...payload}` to every current subscriber.
    fn publish(&self, event_type: &str, payload: Payload) -> PublishOutcome;

    /// Run `callback` for each later message that passes `filter`.
    fn subscribe_filtered(
        &self,
        filter: SubscriptionFilter,
        callback: MessageCallback,
    ) -> Subscription;

    /// Run `callback` for each later message.
    fn subscribe(&self, callback: MessageCallback) -> Subscription {
        self.subscribe_filtered(SubscriptionFilter::new(), callback)
    }

    /// Publish caller data that serializes to a JSON object.
    fn publish_serialized<T: Serialize>(&self, event_type: &str, data: &T) -> PublishOutcome
    where
        Self: Sized,
    {
        let error = match payload_from(data) {
            Ok(payload) => return self.publish(event_type, payload),
            Err(error) => error,
        };

        log::error!("Failed to publish {} update: {}", event_type, error);
        PublishOutcome::Failed {
            reason: error.error_code(),
        }
    }
}
