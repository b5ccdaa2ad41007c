//! Application Configuration
//!
//! Layered lowest to highest: `config/default`, `config/local`, the file
//! named by `--config`, then `CARDBANK__*` environment variables.
//! Command-line flags are applied on top by the caller.

use cardbank_portal::default_data_dir;
use cardbank_sdk::{EndpointConfig, DEFAULT_CORE_URL, DEFAULT_GATEWAY_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Transaction gateway (writes)
    #[serde(default)]
    pub gateway: GatewaySettings,

    /// Core banking service (reads)
    #[serde(default)]
    pub core: CoreSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewaySettings {
    #[serde(default = "default_gateway_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: default_gateway_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl GatewaySettings {
    pub fn endpoint(&self) -> EndpointConfig {
        EndpointConfig::new(&self.base_url).with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreSettings {
    #[serde(default = "default_core_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            base_url: default_core_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl CoreSettings {
    pub fn endpoint(&self) -> EndpointConfig {
        EndpointConfig::new(&self.base_url).with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Where the session survives restarts (default: `<data dir>/session.json`)
    pub storage_path: Option<PathBuf>,
}

impl SessionSettings {
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| default_data_dir().join("session.json"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Delay between an accepted transaction and the re-fetch
    #[serde(default = "default_refresh_delay")]
    pub refresh_delay_ms: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_delay_ms: default_refresh_delay(),
        }
    }
}

impl DashboardSettings {
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Log file (default: `<data dir>/cardbank.log`)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| default_data_dir().join("cardbank.log"))
    }
}

// =============================================================================
// Default Functions
// =============================================================================

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_core_url() -> String {
    DEFAULT_CORE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_refresh_delay() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl AppConfig {
    /// Load configuration from config files and the environment
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();
        Self::load_from(Path::new("."), config_path)
    }

    /// Load with the `config/` directory resolved against `base_dir`
    pub fn load_from(base_dir: &Path, config_path: Option<&str>) -> anyhow::Result<Self> {
        let layer = |name: &str| base_dir.join("config").join(name).to_string_lossy().into_owned();

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(&layer("default")).required(false))
            .add_source(config::File::with_name(&layer("local")).required(false));

        // an explicit file beats both checked-in layers
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CARDBANK")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, gateway_url: Option<String>, core_url: Option<String>) -> Self {
        if let Some(url) = gateway_url {
            self.gateway.base_url = url;
        }
        if let Some(url) = core_url {
            self.core.base_url = url;
        }
        self
    }
}
