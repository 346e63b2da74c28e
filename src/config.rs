use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    #[serde(default)]
    pub explore: ExploreSettings,
    #[serde(default)]
    pub seed: SeedSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Which backing store to run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Redis,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

fn default_backend() -> BackendKind { BackendKind::Redis }
fn default_redis_url() -> String { "redis://127.0.0.1:6379".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct ExploreSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u64,
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
    /// Decisions are permanent unless set
    pub decision_ttl_secs: Option<u64>,
}

impl ExploreSettings {
    pub fn decision_ttl(&self) -> Option<Duration> {
        self.decision_ttl_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Default for ExploreSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            decision_ttl_secs: None,
        }
    }
}

fn default_limit() -> u64 { 10 }
fn default_max_limit() -> u64 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct SeedSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_num_users")]
    pub num_users: u64,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            num_users: default_num_users(),
        }
    }
}

fn default_num_users() -> u64 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Unknown names fall back to compact
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with EXPLORE_)
    /// 4. `REDIS_ADDR`, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local development overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., EXPLORE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("EXPLORE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_redis_addr(settings, std::env::var("REDIS_ADDR").ok())?;

        settings.try_deserialize()
    }
}

/// Override `store.redis_url` from a bare `host:port` address
fn apply_redis_addr(settings: Config, redis_addr: Option<String>) -> Result<Config, ConfigError> {
    match redis_addr.filter(|addr| !addr.trim().is_empty()) {
        Some(addr) => Config::builder()
            .add_source(settings)
            .set_override("store.redis_url", normalize_redis_url(&addr))?
            .build(),
        None => Ok(settings),
    }
}

/// `host:port` becomes `redis://host:port`; full URLs pass through
pub fn normalize_redis_url(addr: &str) -> String {
    let addr = addr.trim();
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("redis://{}", addr)
    }
}
