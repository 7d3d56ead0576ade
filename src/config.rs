//! Configuration
//!
//! Layering, later wins: defaults, config file, environment, CLI flags.
//! The config file is `$ITERCR_CONFIG` or `<config_dir>/itercr/config.toml`.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "ITERCR_CONFIG";
/// Environment variable for the API base URL
pub const API_URL_ENV: &str = "ITERCR_API_URL";
/// Environment variable for the bearer token
pub const TOKEN_ENV: &str = "ITERCR_TOKEN";
/// Environment variable for the cache file path
pub const CACHE_PATH_ENV: &str = "ITERCR_CACHE_PATH";

/// Default API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote service base URL
    pub api_url: String,
    /// Token read from the config file (the environment is consulted by `auth`)
    pub token: Option<String>,
    /// Cache file override
    pub cache_path: Option<PathBuf>,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Config file that was loaded, if any
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            cache_path: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            source: None,
        }
    }
}

/// Config file contents; every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_url: Option<String>,
    token: Option<String>,
    cache_path: Option<PathBuf>,
    request_timeout_secs: Option<u64>,
}

/// Overrides supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `--api-url`
    pub api_url: Option<String>,
}

impl Config {
    /// Load configuration from the discovered file, the environment and CLI flags
    pub fn load(overrides: &CliOverrides) -> Result<Self> {
        let mut config = match discover_config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        if let Some(url) = &overrides.api_url {
            config.api_url.clone_from(url);
        }
        debug!("Loaded config: api_url={}", config.api_url);
        Ok(config)
    }

    /// Load a specific config file on top of the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        let mut config = Self::from_toml(&text).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse TOML config text on top of the defaults
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        let defaults = Self::default();
        Ok(Self {
            api_url: file.api_url.unwrap_or(defaults.api_url),
            token: file.token.filter(|t| !t.trim().is_empty()),
            cache_path: file.cache_path,
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            source: None,
        })
    }

    fn apply_env(&mut self) {
        if let Some(url) = non_empty_env(API_URL_ENV) {
            self.api_url = url;
        }
        if let Some(path) = non_empty_env(CACHE_PATH_ENV) {
            self.cache_path = Some(PathBuf::from(path));
        }
    }

    /// Cache file to use: configured path or the platform default
    pub fn cache_file(&self) -> Option<PathBuf> {
        self.cache_path
            .clone()
            .or_else(crate::cache::FileCache::default_path)
    }
}

/// Locate the config file: `$ITERCR_CONFIG`, else `<config_dir>/itercr/config.toml`
pub fn discover_config_file() -> Option<PathBuf> {
    if let Some(path) = non_empty_env(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("itercr").join("config.toml"))
        .filter(|path| path.is_file())
}

pub(crate) fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
