//! Listing page parser
//!
//! Locates every listing entry on a page and hands each to the
//! [`MovieItemExtractor`]. An empty result is not an error here; the
//! crawler decides what an empty page means.

use super::movie_item_extractor::compile_selector;
use super::{ContextualParser, MovieItemExtractor, MovieListSelectors, ParseContext, ParsingResult};
use crate::domain::movie::MovieRecord;
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Parser for extracting chart entries from listing pages
#[derive(Debug)]
pub struct MovieListParser {
    entry_selector: Selector,
    extractor: MovieItemExtractor,
}

impl MovieListParser {
    /// Create a parser with the default chart selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&MovieListSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &MovieListSelectors) -> ParsingResult<Self> {
        Ok(Self {
            entry_selector: compile_selector("entry", &selectors.entry)?,
            extractor: MovieItemExtractor::with_config(selectors)?,
        })
    }

    /// Parse a raw page body
    pub fn parse_page(&self, body: &str, context: &ParseContext) -> Vec<MovieRecord> {
        let document = Html::parse_document(body);
        self.parse_with_context(&document, context)
    }
}

impl ContextualParser for MovieListParser {
    type Output = Vec<MovieRecord>;
    type Context = ParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> Self::Output {
        let records: Vec<MovieRecord> = html
            .select(&self.entry_selector)
            .map(|entry| self.extractor.extract(&entry))
            .collect();

        debug!(
            "Parsed {} entries from page {} (start={})",
            records.len(),
            context.page_index + 1,
            context.offset
        );

        if !records.is_empty() && records.len() != context.expected_entries as usize {
            warn!(
                "Page {} returned {} entries, expected {}",
                context.page_index + 1,
                records.len(),
                context.expected_entries
            );
        }

        records
    }
}
