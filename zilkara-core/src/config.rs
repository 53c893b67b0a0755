// zilkara-core/src/config.rs
// Layered settings: built-in defaults < optional config file < ZILKARA_* environment.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PROVIDER_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_CACHE_KEY: &str = "assets_payload";
/// Forty provider pages; anything larger is a typo.
pub const MAX_UNIVERSE_SIZE: usize = 10_000;

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub quote_currency: String,
    pub universe_size: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl SourceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROVIDER_URL.to_string(),
            quote_currency: "eur".to_string(),
            universe_size: 250,
            request_timeout_secs: 20,
            user_agent: "rfs-crypto-v1".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LinkConfig {
    pub base_url: String,
    #[serde(default)]
    pub referral: Option<String>,
}

/// What the cache entry holds.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CachePayload {
    Snapshot,
    Assets,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default)]
    pub url: Option<String>,
    pub key: String,
    pub payload: CachePayload,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub link: LinkConfig,
    pub cache: CacheConfig,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("config")
    }

    /// Loads `<name>.{toml,json,yaml,...}` if present, then environment overrides.
    pub fn from_file(name: &str) -> Result<Self, ConfigError> {
        let defaults = SourceConfig::default();

        let s = Config::builder()
            .set_default("source.base_url", defaults.base_url)?
            .set_default("source.quote_currency", defaults.quote_currency)?
            .set_default("source.universe_size", defaults.universe_size as i64)?
            .set_default("source.request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("source.user_agent", defaults.user_agent)?
            .set_default("output.path", "data/assets.json")?
            .set_default("link.base_url", zilkara_common::data::DEFAULT_VENUE_BASE_URL)?
            .set_default("cache.key", DEFAULT_CACHE_KEY)?
            .set_default("cache.payload", "snapshot")?
            .add_source(File::with_name(name).required(false))
            .add_source(
                Environment::with_prefix("ZILKARA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // Plain REDIS_URL is what hosted cache providers export.
        if settings.cache.url.is_none() {
            settings.cache.url = std::env::var("REDIS_URL").ok();
        }
        settings.cache.url = settings.cache.url.filter(|url| !url.trim().is_empty());

        if !(1..=MAX_UNIVERSE_SIZE).contains(&settings.source.universe_size) {
            return Err(ConfigError::Message(format!(
                "source.universe_size must be between 1 and {}, got {}",
                MAX_UNIVERSE_SIZE, settings.source.universe_size
            )));
        }

        Ok(settings)
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.url.is_some()
    }
}
