//! Field extraction for a single chart entry
//!
//! Each field is computed by its own total function: a missing sub-element
//! maps to an empty string and never prevents the other fields from being
//! extracted.

use super::config::MovieListSelectors;
use super::{ParsingError, ParsingResult};
use crate::domain::movie::MovieRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::trace;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").expect("valid year regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static COUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9,]+").expect("valid count regex"));

/// Separator used for joined title and tail segments
pub const SEGMENT_SEPARATOR: &str = " / ";

/// Compile one configured selector, naming the field on failure
pub(crate) fn compile_selector(field: &str, css: &str) -> ParsingResult<Selector> {
    if css.trim().is_empty() {
        return Err(ParsingError::EmptySelector {
            field: field.to_string(),
        });
    }
    Selector::parse(css).map_err(|e| ParsingError::invalid_selector(field, css, &e.to_string()))
}

/// Extracts a [`MovieRecord`] from one listing entry element
#[derive(Debug)]
pub struct MovieItemExtractor {
    title: Selector,
    original_title: Selector,
    info: Selector,
    rating: Selector,
    rating_count: Selector,
    rating_count_marker: String,
    quote: Selector,
}

impl MovieItemExtractor {
    /// Create an extractor with the default chart selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&MovieListSelectors::default())
    }

    /// Create an extractor from a selector configuration
    pub fn with_config(selectors: &MovieListSelectors) -> ParsingResult<Self> {
        Ok(Self {
            title: compile_selector("title", &selectors.title)?,
            original_title: compile_selector("original_title", &selectors.original_title)?,
            info: compile_selector("info", &selectors.info)?,
            rating: compile_selector("rating", &selectors.rating)?,
            rating_count: compile_selector("rating_count", &selectors.rating_count)?,
            rating_count_marker: selectors.rating_count_marker.clone(),
            quote: compile_selector("quote", &selectors.quote)?,
        })
    }

    /// Build the full record for one entry. Never fails.
    pub fn extract(&self, entry: &ElementRef) -> MovieRecord {
        let info_text = self.extract_info_text(entry);
        let record = MovieRecord {
            title: self.extract_title(entry),
            original_title: first_stripped_text(entry, &self.original_title),
            year: extract_year(&info_text),
            tail: extract_tail(&info_text),
            rating: first_stripped_text(entry, &self.rating),
            num_ratings: self.extract_num_ratings(entry),
            quote: first_stripped_text(entry, &self.quote),
            info_text,
        };
        trace!("Extracted entry: {:?}", record);
        record
    }

    /// All title spans, each stripped, joined with " / "
    pub fn extract_title(&self, entry: &ElementRef) -> String {
        entry
            .select(&self.title)
            .map(|span| stripped_text(&span))
            .collect::<Vec<_>>()
            .join(SEGMENT_SEPARATOR)
    }

    /// Info paragraph text with node boundaries as spaces and whitespace collapsed
    pub fn extract_info_text(&self, entry: &ElementRef) -> String {
        entry
            .select(&self.info)
            .next()
            .map(|paragraph| normalize_whitespace(&paragraph.text().collect::<Vec<_>>().join(" ")))
            .unwrap_or_default()
    }

    /// Digits of the first count span carrying the marker, commas removed.
    ///
    /// The first marked span wins even when it holds no digits.
    pub fn extract_num_ratings(&self, entry: &ElementRef) -> String {
        if self.rating_count_marker.is_empty() {
            return String::new();
        }
        entry
            .select(&self.rating_count)
            .map(|span| stripped_text(&span))
            .find(|text| text.contains(&self.rating_count_marker))
            .and_then(|text| COUNT_RE.find(&text).map(|m| m.as_str().replace(',', "")))
            .unwrap_or_default()
    }
}

/// First run of four digits in the info text
pub fn extract_year(info_text: &str) -> String {
    YEAR_RE
        .find(info_text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Slash-separated segments following the first segment that holds a year
pub fn extract_tail(info_text: &str) -> String {
    let parts: Vec<&str> = info_text
        .split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    parts
        .iter()
        .position(|part| YEAR_RE.is_match(part))
        .map(|idx| parts[idx + 1..].join(SEGMENT_SEPARATOR))
        .unwrap_or_default()
}

/// Collapse whitespace runs to a single space and trim
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").trim().to_string()
}

/// Text nodes of an element, each trimmed, concatenated without separator
fn stripped_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect()
}

fn first_stripped_text(entry: &ElementRef, selector: &Selector) -> String {
    entry
        .select(selector)
        .next()
        .map(|element| stripped_text(&element))
        .unwrap_or_default()
}
