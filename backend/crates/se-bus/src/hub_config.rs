/// Limits for the channel hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Messages buffered per channel before slow receivers start lagging
    pub channel_capacity: usize,
    /// Listening handles allowed on one channel; send-only handles are not capped
    pub max_handles_per_channel: usize,
    /// Distinct channel names allowed at once
    pub max_channels: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            max_handles_per_channel: 1000,
            max_channels: 64,
        }
    }
}
