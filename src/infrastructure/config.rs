//! Configuration infrastructure
//!
//! Contains configuration loading and management for the chart crawler.
//!
//! Everything the crawler needs (target URL, request headers, pacing,
//! selectors, output location) is carried explicitly in [`AppConfig`] and
//! handed to each component at construction.

#![allow(clippy::uninlined_format_args)]

use crate::infrastructure::parsing::MovieListSelectors;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokio::fs;
use tracing::info;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page_size must be greater than zero")]
    ZeroPageSize,

    #[error("min_delay_ms ({min}) must not exceed max_delay_ms ({max})")]
    InvalidDelayRange { min: u64, max: u64 },

    #[error("base_url is not a valid URL: {0}")]
    InvalidBaseUrl(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fetch loop settings
    pub crawler: CrawlerConfig,

    /// CSS selectors for listing pages
    pub selectors: MovieListSelectors,

    /// CSV output settings
    pub export: ExportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Fetch loop settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Listing URL; the offset is appended as the `start` query parameter
    pub base_url: String,

    /// Browser-identifying User-Agent sent with every request
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Entries per listing page (offset step)
    pub page_size: u32,

    /// Total entries in the chart (offsets stay strictly below this)
    pub total_items: u32,

    /// Lower bound of the politeness delay after a successful page
    pub min_delay_ms: u64,

    /// Upper bound (exclusive) of the politeness delay
    pub max_delay_ms: u64,

    /// Wait after a failed request before moving to the next offset
    pub failure_backoff_ms: u64,

    /// Stop the crawl when a page yields no entries (likely blocked or layout changed)
    pub stop_on_empty_page: bool,
}

/// CSV output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output CSV path
    pub output_path: PathBuf,

    /// Number of rows logged as a preview after export
    pub preview_rows: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Module-specific log level filters (e.g., "reqwest": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: douban::TOP250_URL.to_string(),
            user_agent: defaults::USER_AGENT.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            page_size: defaults::PAGE_SIZE,
            total_items: defaults::TOTAL_ITEMS,
            min_delay_ms: defaults::MIN_DELAY_MS,
            max_delay_ms: defaults::MAX_DELAY_MS,
            failure_backoff_ms: defaults::FAILURE_BACKOFF_MS,
            stop_on_empty_page: defaults::STOP_ON_EMPTY_PAGE,
        }
    }
}

impl CrawlerConfig {
    /// Check invariants the fetch loop relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(ConfigError::InvalidDelayRange {
                min: self.min_delay_ms,
                max: self.max_delay_ms,
            });
        }
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }

    /// Pagination offsets: 0, page_size, 2*page_size, ... below total_items
    pub fn offsets(&self) -> Vec<u32> {
        if self.page_size == 0 {
            return Vec::new();
        }
        (0..self.total_items).step_by(self.page_size as usize).collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn failure_backoff(&self) -> Duration {
        Duration::from_millis(self.failure_backoff_ms)
    }

    /// Random politeness delay in [min_delay_ms, max_delay_ms)
    pub fn politeness_delay(&self) -> Duration {
        let millis = if self.max_delay_ms > self.min_delay_ms {
            fastrand::u64(self.min_delay_ms..self.max_delay_ms)
        } else {
            self.min_delay_ms
        };
        Duration::from_millis(millis)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(defaults::OUTPUT_PATH),
            preview_rows: defaults::PREVIEW_ROWS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("reqwest".to_string(), "warn".to_string());
                filters.insert("hyper".to_string(), "warn".to_string());
                filters.insert("html5ever".to_string(), "warn".to_string());
                filters.insert("selectors".to_string(), "warn".to_string());
                filters
            },
        }
    }
}

/// Reads settings from the user config directory
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Create a configuration manager for the standard location
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Create a configuration manager for an explicit file
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load configuration from file.
    ///
    /// A missing file yields the defaults and nothing is written. A file that
    /// cannot be read, parsed or validated is an error; the caller decides
    /// whether to fall back.
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!("Configuration file not found, using defaults: {:?}", self.config_path);
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .with_context(|| format!("Failed to read configuration file {:?}", self.config_path))?;

        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file {:?}", self.config_path))?;
        config
            .crawler
            .validate()
            .with_context(|| format!("Invalid crawler settings in {:?}", self.config_path))?;

        info!("Loaded configuration from: {:?}", self.config_path);
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }
}

/// Douban Movie Top 250 chart
pub mod douban {
    /// Chart listing URL (paginated with `?start=<offset>`)
    pub const TOP250_URL: &str = "https://movie.douban.com/top250";

    /// Pagination query parameter
    pub const OFFSET_PARAM: &str = "start";
}

/// Default crawling configuration values
pub mod defaults {
    /// Directory name under the user config dir
    pub const APP_DIR_NAME: &str = "top250-crawler";

    /// Configuration file name
    pub const CONFIG_FILE_NAME: &str = "config.json";

    /// Browser User-Agent
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    /// Default request timeout in seconds
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;

    /// Entries per listing page
    pub const PAGE_SIZE: u32 = 25;

    /// Entries in the full chart
    pub const TOTAL_ITEMS: u32 = 250;

    /// Politeness delay bounds in milliseconds
    pub const MIN_DELAY_MS: u64 = 1000;
    pub const MAX_DELAY_MS: u64 = 2500;

    /// Wait after a failed page request in milliseconds
    pub const FAILURE_BACKOFF_MS: u64 = 5000;

    pub const STOP_ON_EMPTY_PAGE: bool = true;

    /// Default CSV output path
    pub const OUTPUT_PATH: &str = "douban_top250_raw.csv";

    /// Rows shown in the post-export preview
    pub const PREVIEW_ROWS: usize = 5;

    // Log configuration defaults
    pub const LOG_LEVEL: &str = "info";
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;

    /// Log file name inside the log directory
    pub const LOG_FILE_NAME: &str = "top250-crawler.log";
}
