//! Infrastructure layer for HTTP fetching, HTML parsing and CSV export

pub mod config; // Configuration constants and loading
pub mod crawling; // Sequential page crawler
pub mod csv_export;
pub mod logging; // Logging infrastructure
pub mod parsing; // Listing page parsing
pub mod parsing_error;
pub mod simple_http_client;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, CrawlerConfig, ExportConfig, LoggingConfig};
pub use crawling::{CrawlOutcome, CrawlSummary, PageOutcome, PageSource, Top250Crawler};
pub use csv_export::{CsvExporter, ExportError};
pub use logging::{get_log_directory, init_logging_with_config};
pub use parsing::{MovieItemExtractor, MovieListParser, MovieListSelectors, ParsingError, ParsingResult};
pub use simple_http_client::{FetchError, HttpClient};
