use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main catalog configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// URL the recipes are requested from
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Retry behavior for failed requests
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Configuration for retry behavior
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, the first one included
    #[serde(default = "default_retry_attempts")]
    pub attempts: u32,
    /// Delay after the first failed attempt in milliseconds (doubles each time)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: default_retry_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: default_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

// Default value functions
fn default_endpoint() -> String {
    "http://localhost:8000/recepies".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

impl CatalogConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_CATALOG__ prefix
    /// 2. recipe_catalog.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_CATALOG__RETRY__ATTEMPTS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`CatalogConfig::load`] for the source priority.
pub fn load_config() -> Result<CatalogConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_catalog").required(false))
        // Use double underscore for nested: RECIPE_CATALOG__RETRY__BASE_DELAY_MS
        .add_source(
            Environment::with_prefix("RECIPE_CATALOG")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
