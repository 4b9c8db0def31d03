//! Application layer module
//!
//! Use cases that orchestrate the crawling and export infrastructure.

pub mod crawl_session;

pub use crawl_session::{CrawlSession, SessionReport};
