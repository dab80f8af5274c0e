use crate::{
    BusConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR_NAME, LoggingConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub bus: BusConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. SE_CONFIG_DIR env var, else ./.shipease/
    /// 2. Create the config directory if missing
    /// 3. Read config.toml if present, else defaults
    /// 4. Apply SE_* environment variable overrides
    ///
    /// Does NOT validate; call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: SE_CONFIG_DIR env var > ./.shipease/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.bus.validate()?;

        if let Some(ref file) = self.logging.file
            && file.trim().is_empty()
        {
            return Err(ConfigError::logging("logging.file cannot be empty"));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Absolute path of the static frontend directory, if one is configured
    pub fn static_dir_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.server.static_dir {
            Some(ref dir) => Ok(Some(Self::config_dir()?.join(dir))),
            None => Ok(None),
        }
    }

    /// Absolute path of the log file, if logging to a file
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref file) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(file),
            )),
            None => Ok(None),
        }
    }

    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (send buffer {})",
            self.server.host, self.server.port, self.server.send_buffer_size
        );
        info!(
            "  static: {}",
            self.server.static_dir.as_deref().unwrap_or("disabled")
        );
        info!(
            "  bus: channel={}, capacity={}, max_handles={}, max_channels={}",
            self.bus.channel_name,
            self.bus.channel_capacity,
            self.bus.max_handles_per_channel,
            self.bus.max_channels
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("SE_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("SE_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "SE_WS_SEND_BUFFER_SIZE",
            &mut self.server.send_buffer_size,
        );
        Self::apply_env_option_string("SE_SERVER_STATIC_DIR", &mut self.server.static_dir);

        // Bus
        Self::apply_env_string("SE_BUS_CHANNEL_NAME", &mut self.bus.channel_name);
        Self::apply_env_parse(
            "SE_BUS_CHANNEL_CAPACITY",
            &mut self.bus.channel_capacity,
        );
        Self::apply_env_parse(
            "SE_BUS_MAX_HANDLES_PER_CHANNEL",
            &mut self.bus.max_handles_per_channel,
        );
        Self::apply_env_parse("SE_BUS_MAX_CHANNELS", &mut self.bus.max_channels);

        // Logging
        Self::apply_env_parse("SE_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("SE_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("SE_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"; anything else is false
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values are ignored and the previous value kept
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
