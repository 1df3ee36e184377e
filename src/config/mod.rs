//! Configuration module for the sentiment service

use crate::sentiment::catalog::{CurrencyProfiles, ThemeCatalog};
use crate::sentiment::query::default_econ_terms;
use crate::utils::error::{Error, Result};
use crate::utils::types::CurrencyPair;
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration file version
    pub version: String,

    /// Process-level settings
    pub app: AppConfig,

    /// News index client settings
    pub news: NewsConfig,

    /// Pairs offered to API clients
    pub signal: SignalConfig,

    /// Search query settings
    pub query: QueryConfig,

    /// Weighted macro themes, in priority order
    #[serde(default)]
    pub themes: ThemeCatalog,

    /// Supported currencies and their search terms
    #[serde(default)]
    pub currencies: CurrencyProfiles,
}

/// Application-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Interface the HTTP API binds to
    pub bind_addr: String,
    /// Port of the HTTP API
    pub port: u16,
}

/// GDELT DOC 2.0 client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsConfig {
    /// DOC API endpoint
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Articles requested per currency (GDELT caps this at 250)
    pub max_records: u32,
    /// Result ordering, e.g. `datedesc`
    pub sort: String,
    /// Look-back window used when a request does not name one
    pub default_timespan: String,
    /// Headlines returned per side for display
    #[serde(default = "default_headline_limit")]
    pub headline_limit: usize,
}

/// Signal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Pairs listed by `/api/pairs`
    pub pairs: Vec<String>,
}

/// Query builder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Economic filter terms AND-ed with every currency query
    pub econ_terms: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            app: AppConfig::default(),
            news: NewsConfig::default(),
            signal: SignalConfig::default(),
            query: QueryConfig::default(),
            themes: ThemeCatalog::default(),
            currencies: CurrencyProfiles::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), bind_addr: "127.0.0.1".to_string(), port: 3000 }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.gdeltproject.org/api/v2/doc/doc".to_string(),
            timeout_secs: 12,
            max_records: 40,
            sort: "datedesc".to_string(),
            default_timespan: "24h".to_string(),
            headline_limit: default_headline_limit(),
        }
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            pairs: ["EURUSD", "USDJPY", "GBPUSD", "AUDUSD", "USDCAD", "USDCHF", "NZDUSD"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { econ_terms: default_econ_terms() }
    }
}

// --------- Helper default functions for serde ---------
fn default_headline_limit() -> usize {
    10
}

impl Config {
    /// Serialize default config to TOML string
    pub fn default_toml() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    /// Load configuration from a specific file path
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::ConfigError(format!("Failed to read config file {:?}: {}", path.as_ref(), e))
        })?;
        let mut cfg: Self = toml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;
        cfg.merge_env()?;
        Ok(cfg)
    }

    /// Save the configuration to a file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigError(format!("Failed to create directory {:?}: {}", parent, e))
            })?;
        }
        std::fs::write(path, content).map_err(|e| {
            Error::ConfigError(format!("Failed to write config file {:?}: {}", path, e))
        })?;
        Ok(())
    }

    /// Validate the configuration for required fields and reasonable values
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::ConfigError("Config version must be set (e.g., '0.1.0')".to_string()));
        }
        self.socket_addr()?;

        // News client
        if self.news.endpoint.trim().is_empty() {
            return Err(Error::ConfigError("news.endpoint must be set".to_string()));
        }
        url::Url::parse(&self.news.endpoint)
            .map_err(|e| Error::ConfigError(format!("news.endpoint is not a URL: {}", e)))?;
        if self.news.timeout_secs == 0 {
            return Err(Error::ConfigError("news.timeout_secs must be > 0".to_string()));
        }
        if self.news.max_records == 0 || self.news.max_records > 250 {
            return Err(Error::ConfigError("news.max_records must be within 1..=250".to_string()));
        }
        if self.news.default_timespan.trim().is_empty() {
            return Err(Error::ConfigError("news.default_timespan must be set".to_string()));
        }

        // Tables
        ThemeCatalog::new(self.themes.themes().to_vec())?;
        let currencies = CurrencyProfiles::new(self.currencies.profiles().to_vec())?;
        if self.query.econ_terms.iter().all(|t| t.trim().is_empty()) {
            return Err(Error::ConfigError("query.econ_terms must not be empty".to_string()));
        }
        for pair in &self.signal.pairs {
            CurrencyPair::parse(pair, &currencies).map_err(|e| {
                Error::ConfigError(format!("signal.pairs entry '{}' is invalid: {}", pair, e))
            })?;
        }
        Ok(())
    }

    /// Address the HTTP API listens on
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.app.bind_addr, self.app.port).parse::<SocketAddr>().map_err(|e| {
            Error::ConfigError(format!(
                "Invalid bind address {}:{}: {}",
                self.app.bind_addr, self.app.port, e
            ))
        })
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        // Try to load from current directory
        if let Ok(config) = Self::from_file("config.toml") {
            return Ok(config);
        }

        // Try to load from user config directory
        if let Some(mut path) = dirs::config_dir() {
            path.push("fxsentiment");
            path.push("config.toml");
            if path.exists() {
                return Self::from_file(path);
            }
        }

        let mut config = Self::default();
        config.merge_env()?;
        Ok(config)
    }

    /// Merge environment variables into the configuration
    pub fn merge_env(&mut self) -> Result<()> {
        if let Ok(level) = env::var("FXSENTIMENT_LOG_LEVEL") {
            self.app.log_level = level;
        }

        if let Ok(bind) = env::var("FXSENTIMENT_BIND") {
            self.app.bind_addr = bind;
        }

        if let Ok(port) = env::var("PORT") {
            self.app.port = port
                .trim()
                .parse()
                .map_err(|e| Error::ConfigError(format!("PORT must be a port number: {}", e)))?;
        }

        if let Ok(endpoint) = env::var("GDELT_ENDPOINT") {
            self.news.endpoint = endpoint;
        }

        if let Ok(timeout) = env::var("NEWS_TIMEOUT_SECS") {
            self.news.timeout_secs = timeout.trim().parse().map_err(|e| {
                Error::ConfigError(format!("NEWS_TIMEOUT_SECS must be an integer: {}", e))
            })?;
        }

        Ok(())
    }
}
