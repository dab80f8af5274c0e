use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SEND_BUFFER_SIZE,
    MAX_SEND_BUFFER_SIZE, MIN_PORT, MIN_SEND_BUFFER_SIZE,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Outgoing frames buffered per WebSocket client
    pub send_buffer_size: usize,
    /// Built frontend to serve for unmatched routes (relative to the config dir)
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 lets the OS pick
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::server(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::server(format!(
                "server.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        if let Some(ref dir) = self.static_dir
            && (std::path::Path::new(dir).is_absolute() || dir.contains(".."))
        {
            return Err(ConfigError::server(
                "server.static_dir must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
