//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream store provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Scheduled crawl settings
    #[serde(default)]
    pub crawl: CrawlConfig,

    /// Snapshot persistence settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::config("server.port must be > 0"));
        }
        if self.provider.user_agent.trim().is_empty() {
            return Err(AppError::config("provider.user_agent is empty"));
        }
        url::Url::parse(&self.provider.base_url)
            .map_err(|e| AppError::config(format!("provider.base_url is invalid: {e}")))?;
        if self.provider.timeout_secs == Some(0) {
            return Err(AppError::config("provider.timeout_secs must be > 0"));
        }
        if self.crawl.interval_secs == 0 {
            return Err(AppError::config("crawl.interval_secs must be > 0"));
        }
        if self.crawl.term.trim().is_empty() {
            return Err(AppError::config("crawl.term is empty"));
        }
        if self.crawl.num == 0 {
            return Err(AppError::config("crawl.num must be > 0"));
        }
        if self.crawl.mode == CrawlMode::Persist
            && self.storage.database_path.trim().is_empty()
        {
            return Err(AppError::config(
                "storage.database_path is required when crawl.mode = \"persist\"",
            ));
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "defaults::host")]
    pub host: String,

    /// Overridden by the `PORT` environment variable
    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Allow cross-origin requests from any origin
    #[serde(default = "defaults::enabled")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            cors: defaults::enabled(),
        }
    }
}

/// Upstream store provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the store data provider
    #[serde(default = "defaults::provider_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds (client default when unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::provider_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

/// What the crawl job does with a successful result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlMode {
    /// Log the result count and payload only
    Log,
    /// Insert one snapshot row per result item
    #[default]
    Persist,
}

/// Behavior when a tick fires while the previous run is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Drop the tick
    #[default]
    Skip,
    /// Start another run alongside the one in flight
    Allow,
}

/// Scheduled crawl settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// Seconds between ticks
    #[serde(default = "defaults::interval")]
    pub interval_secs: u64,

    /// Fire a run immediately instead of waiting one interval
    #[serde(default)]
    pub run_on_startup: bool,

    #[serde(default)]
    pub mode: CrawlMode,

    #[serde(default)]
    pub overlap: OverlapPolicy,

    /// Fixed search query
    #[serde(default = "defaults::crawl_term")]
    pub term: String,

    #[serde(default = "defaults::crawl_num")]
    pub num: u32,

    #[serde(default = "defaults::crawl_country")]
    pub country: String,

    #[serde(default = "defaults::crawl_lang")]
    pub lang: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::enabled(),
            interval_secs: defaults::interval(),
            run_on_startup: false,
            mode: CrawlMode::default(),
            overlap: OverlapPolicy::default(),
            term: defaults::crawl_term(),
            num: defaults::crawl_num(),
            country: defaults::crawl_country(),
            lang: defaults::crawl_lang(),
        }
    }
}

/// Snapshot persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database file
    #[serde(default = "defaults::database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: defaults::database_path(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            json: false,
        }
    }
}

mod defaults {
    // Server defaults
    pub fn host() -> String {
        "0.0.0.0".into()
    }
    pub fn port() -> u16 {
        3000
    }
    pub fn enabled() -> bool {
        true
    }

    // Provider defaults
    pub fn provider_url() -> String {
        "http://127.0.0.1:3100".into()
    }
    pub fn user_agent() -> String {
        concat!("game-crawler/", env!("CARGO_PKG_VERSION")).into()
    }

    // Crawl defaults
    pub fn interval() -> u64 {
        24 * 60 * 60
    }
    pub fn crawl_term() -> String {
        "top free games".into()
    }
    pub fn crawl_num() -> u32 {
        10
    }
    pub fn crawl_country() -> String {
        "us".into()
    }
    pub fn crawl_lang() -> String {
        "en".into()
    }

    // Storage defaults
    pub fn database_path() -> String {
        "data/apps.db".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}
