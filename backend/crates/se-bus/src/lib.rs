pub mod broadcast_bus;
pub mod broadcast_message;
mod channel_handle;
pub mod channel_hub;
pub mod channel_name;
pub mod entity_family;
pub mod error;
pub mod event_type;
pub mod handle_id;
pub mod hub_config;
pub mod publish_outcome;
pub mod subscription;
pub mod subscription_filter;
pub mod update_bus;
pub mod update_notifier;

pub use broadcast_bus::BroadcastBus;
pub use broadcast_message::{BroadcastMessage, Payload, TIMESTAMP_KEY, TYPE_KEY};
pub use channel_handle::ChannelHandle;
pub use channel_hub::ChannelHub;
pub use channel_name::{ChannelName, DEFAULT_CHANNEL_NAME, MAX_CHANNEL_NAME_LENGTH};
pub use entity_family::EntityFamily;
pub use error::{BusError, BusErrorResult};
pub use event_type::{EventType, is_refresh_event};
pub use handle_id::HandleId;
pub use hub_config::HubConfig;
pub use publish_outcome::PublishOutcome;
pub use subscription::{MessageCallback, Subscription, SubscriptionState};
pub use subscription_filter::SubscriptionFilter;
pub use update_bus::UpdateBus;
pub use update_notifier::UpdateNotifier;

#[cfg(test)]
mod tests;
