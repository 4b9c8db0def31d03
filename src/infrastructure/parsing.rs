//! HTML parsing infrastructure for chart listing pages
//!
//! Selector configuration, the per-entry field extractor and the page-level
//! listing parser.

pub mod config;
pub mod context;
pub mod error;
pub mod movie_item_extractor;
pub mod movie_list_parser;

// Re-export public types
pub use config::MovieListSelectors;
pub use context::ParseContext;
pub use error::{ParsingError, ParsingResult};
pub use movie_item_extractor::MovieItemExtractor;
pub use movie_list_parser::MovieListParser;

use scraper::Html;

/// Parser over an already-built document with contextual information
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> Self::Output;
}
