//! Configuration management for PageProbe components
//!
//! Every setting has a default matching the stock service (port 3001,
//! 10 s page fetch, 5 s probes), so running without a config file is normal.

use pageprobe_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP service settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Scanner settings
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Merge with environment variables (PAGEPROBE_ prefix)
    pub fn merge_env(self) -> Result<Self> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(val) = var("PAGEPROBE_BIND_ADDR") {
            self.server.bind_addr = val.parse().map_err(|_| Error::Configuration(format!(
                "PAGEPROBE_BIND_ADDR is not a socket address: {}",
                val
            )))?;
        }

        if let Some(val) = var("PAGEPROBE_FETCH_TIMEOUT") {
            if let Ok(n) = val.parse() {
                self.scanner.fetch_timeout_seconds = n;
            }
        }
        if let Some(val) = var("PAGEPROBE_PROBE_TIMEOUT") {
            if let Ok(n) = val.parse() {
                self.scanner.probe_timeout_seconds = n;
            }
        }
        if let Some(val) = var("PAGEPROBE_INSECURE_DOMAINS") {
            self.scanner.insecure_domains = val
                .split(',')
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect();
        }

        if let Some(val) = var("PAGEPROBE_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = var("PAGEPROBE_LOG_FORMAT") {
            self.logging.format = val;
        }

        Ok(self)
    }
}

/// HTTP service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the scan API listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3001))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Scanner-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Timeout for the initial page fetch
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,

    /// Timeout for each XSS / SQL injection probe request
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Hostnames reported as insecure on sight (exact, lowercase match)
    #[serde(default = "default_insecure_domains")]
    pub insecure_domains: Vec<String>,
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_probe_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("PageProbe/{}", env!("CARGO_PKG_VERSION"))
}

fn default_insecure_domains() -> Vec<String> {
    vec![String::from("testphp.vulnweb.com")]
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_seconds: default_fetch_timeout(),
            probe_timeout_seconds: default_probe_timeout(),
            user_agent: default_user_agent(),
            insecure_domains: default_insecure_domains(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("pretty")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Builder for constructing Config
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.config.server.bind_addr = addr;
        self
    }

    pub fn fetch_timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.scanner.fetch_timeout_seconds = seconds;
        self
    }

    pub fn probe_timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.scanner.probe_timeout_seconds = seconds;
        self
    }

    pub fn insecure_domain(mut self, domain: impl Into<String>) -> Self {
        self.config
            .scanner
            .insecure_domains
            .push(domain.into().to_lowercase());
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
