//! Parsing configuration for HTML extraction
//!
//! Centralized CSS selectors for the chart listing pages.

use serde::{Deserialize, Serialize};

/// CSS selectors for chart listing pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieListSelectors {
    /// One listing entry (a single ranked movie)
    pub entry: String,

    /// Title spans; there may be several (release title plus alternates)
    pub title: String,

    /// "Other names" span
    pub original_title: String,

    /// Info paragraph (director, cast, year, country, genre)
    pub info: String,

    /// Rating number
    pub rating: String,

    /// Candidate spans for the rating count display
    pub rating_count: String,

    /// Marker that identifies the rating count span ("rated by N people")
    pub rating_count_marker: String,

    /// Short quote
    pub quote: String,
}

impl Default for MovieListSelectors {
    fn default() -> Self {
        Self {
            entry: "div.item".to_string(),
            title: "div.hd span.title".to_string(),
            original_title: "div.hd span.other".to_string(),
            info: "div.bd p:not(.quote)".to_string(),
            rating: "span.rating_num".to_string(),
            rating_count: "div.bd div > span".to_string(),
            rating_count_marker: "人评价".to_string(),
            quote: "p.quote span".to_string(),
        }
    }
}
