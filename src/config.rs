//! Configuration management for Kardex
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{KardexError, Result};

/// Main configuration structure for Kardex
///
/// Holds the remote API settings, catalog defaults, and session storage
/// location.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote products API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Catalog listing defaults
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Session persistence settings
    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the products API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://dummyjson.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Catalog listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products requested per page when the command gives no limit
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    30
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Directory holding the credential files
    ///
    /// When unset, the user's data directory is used (or the
    /// `KARDEX_CREDENTIALS_DIR` environment variable when set).
    #[serde(default)]
    pub credentials_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file with environment variable and CLI overrides
    ///
    /// Loading order (later steps win):
    /// 1. Configuration file (YAML), or defaults when the file is absent
    /// 2. Environment variables (`KARDEX_*`)
    /// 3. CLI arguments
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| KardexError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| KardexError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("KARDEX_API_BASE") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("KARDEX_API_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid KARDEX_API_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(page_size) = std::env::var("KARDEX_PAGE_SIZE") {
            if let Ok(value) = page_size.parse() {
                self.catalog.page_size = value;
            } else {
                tracing::warn!("Invalid KARDEX_PAGE_SIZE: {}", page_size);
            }
        }

        if let Ok(dir) = std::env::var("KARDEX_CREDENTIALS_DIR") {
            self.session.credentials_dir = Some(PathBuf::from(dir));
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_base) = &cli.api_base {
            self.api.base_url = api_base.clone();
        }

        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not a valid http(s) URL or a
    /// numeric setting is out of range
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            KardexError::Config(format!("Invalid api.base_url {}: {}", self.api.base_url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(KardexError::Config(format!(
                "api.base_url must use http or https, got {}",
                url.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(
                KardexError::Config("api.timeout_seconds must be greater than 0".to_string())
                    .into(),
            );
        }

        if self.catalog.page_size == 0 {
            return Err(
                KardexError::Config("catalog.page_size must be greater than 0".to_string()).into(),
            );
        }

        Ok(())
    }
}
