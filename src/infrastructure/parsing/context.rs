//! Parsing context for listing pages

/// Context information for parsing one listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseContext {
    /// Zero-based page number within the crawl
    pub page_index: u32,

    /// Pagination offset the page was requested with
    pub offset: u32,

    /// Expected number of entries per page (for diagnostics only)
    pub expected_entries: u32,
}

impl ParseContext {
    /// Create new parse context
    pub fn new(page_index: u32, offset: u32) -> Self {
        use crate::infrastructure::config::defaults::PAGE_SIZE;

        Self {
            page_index,
            offset,
            expected_entries: PAGE_SIZE,
        }
    }

    /// Set expected entries per page
    pub fn with_expected_entries(mut self, count: u32) -> Self {
        self.expected_entries = count;
        self
    }
}
