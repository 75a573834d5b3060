//! API configuration

use std::path::PathBuf;

use serde::Deserialize;

use core_kernel::Timezone;
use domain_registry::DEFAULT_EXPORT_PREFIX;

/// Server configuration
///
/// Every field can be set through a `REGISTRY_`-prefixed environment
/// variable, e.g. `REGISTRY_PORT=9000` or `REGISTRY_SEED_PATH=files.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Timezone of the registry office, used for "today"
    pub timezone: Timezone,
    /// File name prefix of CSV exports
    pub export_prefix: String,
    /// JSON file of property files loaded at startup
    pub seed_path: Option<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            timezone: Timezone::default(),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            seed_path: None,
        }
    }
}

impl RegistryConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("REGISTRY"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
