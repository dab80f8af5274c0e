mod bus_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod server_config;

pub use bus_config::BusConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

#[cfg(test)]
mod tests;

// Server
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const MIN_PORT: u16 = 1024;
const DEFAULT_SEND_BUFFER_SIZE: usize = 100;
const MIN_SEND_BUFFER_SIZE: usize = 1;
const MAX_SEND_BUFFER_SIZE: usize = 10000;

// Bus
const DEFAULT_CHANNEL_CAPACITY: usize = 256;
const MIN_CHANNEL_CAPACITY: usize = 1;
const MAX_CHANNEL_CAPACITY: usize = 65536;
const DEFAULT_MAX_HANDLES_PER_CHANNEL: usize = 1000;
const MIN_MAX_HANDLES_PER_CHANNEL: usize = 1;
const MAX_MAX_HANDLES_PER_CHANNEL: usize = 100000;
const DEFAULT_MAX_CHANNELS: usize = 64;
const MIN_MAX_CHANNELS: usize = 1;
const MAX_MAX_CHANNELS: usize = 4096;

// Logging
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

const CONFIG_DIR_ENV: &str = "SE_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".shipease";
const CONFIG_FILE_NAME: &str = "config.toml";
