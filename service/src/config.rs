use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_string_from_number;

use crate::tracking::{PRODUCTION_ENDPOINT, SANDBOX_ENDPOINT};

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with PT_ prefix (always wins)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub kdn: KdnConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KdnConfig {
    /// Merchant account id (`EBusinessID`). Required, no compiled-in default.
    /// Numeric ids from env vars are accepted as strings.
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub ebusiness_id: String,

    /// Merchant secret used to sign requests. Required, no compiled-in default.
    #[serde(default)]
    pub app_key: String,

    /// Trace query endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl KdnConfig {
    /// Whether the endpoint points at the vendor sandbox.
    #[must_use]
    pub fn is_sandbox(&self) -> bool {
        self.endpoint == SANDBOX_ENDPOINT
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_endpoint() -> String {
    PRODUCTION_ENDPOINT.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for KdnConfig {
    fn default() -> Self {
        Self {
            ebusiness_id: String::new(),
            app_key: String::new(),
            endpoint: default_endpoint(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with PT_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("PT_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kdn.ebusiness_id.is_empty() {
            return Err(ConfigError::Validation(
                "kdn.ebusiness_id is required. Set PT_KDN__EBUSINESS_ID environment variable or configure in config.yaml.".into(),
            ));
        }

        if self.kdn.app_key.is_empty() {
            return Err(ConfigError::Validation(
                "kdn.app_key is required. Set PT_KDN__APP_KEY environment variable or configure in config.yaml.".into(),
            ));
        }

        let endpoint = &self.kdn.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "kdn.endpoint must start with http:// or https://, got: '{endpoint}'"
            )));
        }

        Ok(())
    }
}
