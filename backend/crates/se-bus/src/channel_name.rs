use crate::{BusError, BusErrorResult};

/// Topic shared by every publisher and subscriber of the update bus
pub const DEFAULT_CHANNEL_NAME: &str = "shipease-updates";

pub const MAX_CHANNEL_NAME_LENGTH: usize = 128;

/// Validated channel name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelName(String);

impl ChannelName {
    #[track_caller]
    pub fn new(name: impl Into<String>) -> BusErrorResult<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(BusError::invalid_channel_name("name cannot be empty"));
        }

        if name.len() > MAX_CHANNEL_NAME_LENGTH {
            return Err(BusError::invalid_channel_name(format!(
                "name must be at most {} bytes, got {}",
                MAX_CHANNEL_NAME_LENGTH,
                name.len()
            )));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ChannelName {
    fn default() -> Self {
        Self(String::from(DEFAULT_CHANNEL_NAME))
    }
}

impl std::fmt::Display for ChannelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
