use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CHANNEL_CAPACITY, DEFAULT_MAX_CHANNELS,
    DEFAULT_MAX_HANDLES_PER_CHANNEL, MAX_CHANNEL_CAPACITY, MAX_MAX_CHANNELS,
    MAX_MAX_HANDLES_PER_CHANNEL, MIN_CHANNEL_CAPACITY, MIN_MAX_CHANNELS,
    MIN_MAX_HANDLES_PER_CHANNEL,
};

use se_bus::{ChannelName, DEFAULT_CHANNEL_NAME, HubConfig};

use serde::Deserialize;

/// Update bus settings.
/// `max_handles_per_channel` caps listeners: relay clients plus in-process
/// subscribers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Channel every publisher and subscriber shares
    pub channel_name: String,
    /// Messages buffered per channel before slow receivers lag
    pub channel_capacity: usize,
    pub max_handles_per_channel: usize,
    pub max_channels: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            channel_name: String::from(DEFAULT_CHANNEL_NAME),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            max_handles_per_channel: DEFAULT_MAX_HANDLES_PER_CHANNEL,
            max_channels: DEFAULT_MAX_CHANNELS,
        }
    }
}

impl BusConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.channel()?;

        if self.channel_capacity < MIN_CHANNEL_CAPACITY
            || self.channel_capacity > MAX_CHANNEL_CAPACITY
        {
            return Err(ConfigError::bus(format!(
                "bus.channel_capacity must be {}-{}, got {}",
                MIN_CHANNEL_CAPACITY, MAX_CHANNEL_CAPACITY, self.channel_capacity
            )));
        }

        if self.max_handles_per_channel < MIN_MAX_HANDLES_PER_CHANNEL
            || self.max_handles_per_channel > MAX_MAX_HANDLES_PER_CHANNEL
        {
            return Err(ConfigError::bus(format!(
                "bus.max_handles_per_channel must be {}-{}, got {}",
                MIN_MAX_HANDLES_PER_CHANNEL,
                MAX_MAX_HANDLES_PER_CHANNEL,
                self.max_handles_per_channel
            )));
        }

        if self.max_channels < MIN_MAX_CHANNELS || self.max_channels > MAX_MAX_CHANNELS {
            return Err(ConfigError::bus(format!(
                "bus.max_channels must be {}-{}, got {}",
                MIN_MAX_CHANNELS, MAX_MAX_CHANNELS, self.max_channels
            )));
        }

        Ok(())
    }

    /// Limits in the shape the channel hub takes them
    pub fn hub_config(&self) -> HubConfig {
        HubConfig {
            channel_capacity: self.channel_capacity,
            max_handles_per_channel: self.max_handles_per_channel,
            max_channels: self.max_channels,
        }
    }

    /// Validated name of the shared update channel
    pub fn channel(&self) -> ConfigErrorResult<ChannelName> {
        ChannelName::new(self.channel_name.as_str())
            .map_err(|e| ConfigError::bus(format!("bus.channel_name is invalid: {e}")))
    }
}
