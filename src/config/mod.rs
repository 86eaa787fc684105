//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `ESG_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::analysis::AnalyzerConfig;
use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_SECS, DEFAULT_MAX_ITEMS,
    DEFAULT_SEARCH_TIMEOUT_SECS, SEARCH_WINDOW_DAYS,
};
use crate::history::InMemoryHistory;
use crate::search::openai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, OpenAiConfig};

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `ESG_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Search provider API key. `None` leaves the search client unconfigured.
    pub openai_api_key: Option<String>,

    /// Default: `gpt-4o-mini`.
    pub openai_model: String,

    /// Default: `https://api.openai.com/v1`.
    pub openai_base_url: String,

    /// Max companies held in the result cache. Default: `10`.
    pub cache_capacity: usize,

    /// Seconds a cached result stays valid. Default: `3600`.
    pub cache_ttl_secs: u64,

    /// Items kept per company. Default: `50`.
    pub max_items: usize,

    /// Search timeout in seconds; `0` disables it. Default: `60`.
    pub search_timeout_secs: u64,

    /// History events kept per user. Default: `10`.
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            max_items: DEFAULT_MAX_ITEMS,
            search_timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
            history_limit: InMemoryHistory::DEFAULT_PER_USER_LIMIT,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("cache_capacity", &self.cache_capacity)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("max_items", &self.max_items)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("history_limit", &self.history_limit)
            .finish()
    }
}

impl Config {
    const ENV_PORT: &'static str = "ESG_PORT";
    const ENV_BIND_ADDR: &'static str = "ESG_BIND_ADDR";
    const ENV_OPENAI_API_KEY: &'static str = "ESG_OPENAI_API_KEY";
    const ENV_OPENAI_API_KEY_FALLBACK: &'static str = "OPENAI_API_KEY";
    const ENV_OPENAI_MODEL: &'static str = "ESG_OPENAI_MODEL";
    const ENV_OPENAI_BASE_URL: &'static str = "ESG_OPENAI_BASE_URL";
    const ENV_CACHE_CAPACITY: &'static str = "ESG_CACHE_CAPACITY";
    const ENV_CACHE_TTL_SECS: &'static str = "ESG_CACHE_TTL_SECS";
    const ENV_MAX_ITEMS: &'static str = "ESG_MAX_ITEMS";
    const ENV_SEARCH_TIMEOUT_SECS: &'static str = "ESG_SEARCH_TIMEOUT_SECS";
    const ENV_HISTORY_LIMIT: &'static str = "ESG_HISTORY_LIMIT";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let openai_api_key = Self::parse_optional_string_from_env(Self::ENV_OPENAI_API_KEY)
            .or_else(|| Self::parse_optional_string_from_env(Self::ENV_OPENAI_API_KEY_FALLBACK));
        let openai_model = Self::parse_string_from_env(Self::ENV_OPENAI_MODEL, defaults.openai_model);
        let openai_base_url =
            Self::parse_string_from_env(Self::ENV_OPENAI_BASE_URL, defaults.openai_base_url);
        let cache_capacity =
            Self::parse_number_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity)?;
        let cache_ttl_secs =
            Self::parse_number_from_env(Self::ENV_CACHE_TTL_SECS, defaults.cache_ttl_secs)?;
        let max_items = Self::parse_number_from_env(Self::ENV_MAX_ITEMS, defaults.max_items)?;
        let search_timeout_secs = Self::parse_number_from_env(
            Self::ENV_SEARCH_TIMEOUT_SECS,
            defaults.search_timeout_secs,
        )?;
        let history_limit =
            Self::parse_number_from_env(Self::ENV_HISTORY_LIMIT, defaults.history_limit)?;

        Ok(Self {
            port,
            bind_addr,
            openai_api_key,
            openai_model,
            openai_base_url,
            cache_capacity,
            cache_ttl_secs,
            max_items,
            search_timeout_secs,
            history_limit,
        })
    }

    /// Rejects bounds that would make the cache or normalizer useless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_CACHE_CAPACITY,
            });
        }
        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_CACHE_TTL_SECS,
            });
        }
        if self.max_items == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_MAX_ITEMS,
            });
        }
        if self.history_limit == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_HISTORY_LIMIT,
            });
        }
        if self.openai_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_OPENAI_BASE_URL,
            });
        }
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// `None` when the timeout is disabled.
    pub fn search_timeout(&self) -> Option<Duration> {
        (self.search_timeout_secs > 0).then(|| Duration::from_secs(self.search_timeout_secs))
    }

    pub fn openai_config(&self) -> OpenAiConfig {
        OpenAiConfig {
            api_key: self.openai_api_key.clone(),
            model: self.openai_model.clone(),
            base_url: self.openai_base_url.clone(),
            max_articles: self.max_items,
            ..OpenAiConfig::default()
        }
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            search_window_days: SEARCH_WINDOW_DAYS,
            search_timeout: self.search_timeout(),
            max_items: self.max_items,
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        match Self::parse_optional_string_from_env(var_name) {
            Some(value) => value.parse().map_err(|e| ConfigError::InvalidNumber {
                name: var_name,
                value,
                source: e,
            }),
            None => Ok(default),
        }
    }
}
