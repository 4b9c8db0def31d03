//! Top250 Crawler - movie chart listing scraper
//!
//! Fetches the paginated Douban Movie Top 250 chart, extracts each entry's
//! fields and writes them to a BOM-prefixed UTF-8 CSV file.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{CrawlSession, SessionReport};
pub use domain::{MovieRecord, MovieRow};

use anyhow::{Context, Result};
use infrastructure::config::{AppConfig, ConfigManager};
use tracing::{info, warn};

/// Load configuration, falling back to defaults on any problem.
/// Nothing is written; a bad config never stops the crawl.
async fn load_app_config() -> AppConfig {
    // Logging is not up yet, so problems go to stderr
    let manager = match ConfigManager::new() {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("No configuration directory ({e}), using defaults");
            return AppConfig::default();
        }
    };
    match manager.load_config().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}; using defaults");
            AppConfig::default()
        }
    }
}

/// Crawl the chart and export it using the user's configuration
pub async fn run() -> Result<()> {
    let config = load_app_config().await;

    infrastructure::logging::init_logging_with_config(&config.logging)
        .context("Failed to initialize logging")?;
    infrastructure::logging::log_system_info();

    let report = CrawlSession::new(config).run().await?;

    if report.summary.stopped_early {
        warn!(
            "Crawl stopped early after {} pages; output is partial",
            report.summary.pages_attempted()
        );
    }
    info!(
        "Saved {} records to {}",
        report.records_written,
        report.output_path.display()
    );
    Ok(())
}
