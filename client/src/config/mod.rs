//! Configuration management for the Nutrilog client
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: NL__)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub banner: BannerConfig,
}

/// Nutrition API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Unset means requests may wait forever
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Local store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// File holding locally persisted values; defaults to the platform data dir
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolved store location
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("nutrilog")
                .join("local.toml")
        })
    }
}

/// Banner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    /// 0 keeps messages until replaced
    pub dismiss_after_ms: u64,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 3000,
        }
    }
}

impl BannerConfig {
    pub fn dismiss_after(&self) -> Option<Duration> {
        (self.dismiss_after_ms > 0).then(|| Duration::from_millis(self.dismiss_after_ms))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://127.0.0.1:8000".to_string(),
                request_timeout_secs: None,
            },
            storage: StorageConfig::default(),
            banner: BannerConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with NL__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&ClientConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., NL__API__BASE_URL=http://api:8000 sets api.base_url
            .add_source(config::Environment::with_prefix("NL").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
