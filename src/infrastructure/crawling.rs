//! Chart crawler
//!
//! Walks the pagination offsets strictly in sequence, one request at a time:
//! - a failed request is logged, followed by a backoff, and the page is skipped
//! - a page without entries ends the crawl (configurable)
//! - a page with entries is followed by a random politeness delay

#![allow(clippy::uninlined_format_args)]

use crate::domain::movie::MovieRecord;
use crate::infrastructure::config::CrawlerConfig;
use crate::infrastructure::parsing::{MovieListParser, ParseContext};
use crate::infrastructure::simple_http_client::FetchError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Source of raw listing page bodies, keyed by pagination offset
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, offset: u32) -> Result<String, FetchError>;
}

/// What happened to one offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOutcome {
    /// Page fetched and yielded this many entries
    Parsed(usize),
    /// Request failed; the page's entries are missing from the output
    Failed,
    /// Page fetched but contained no entries
    Empty,
}

/// Per-crawl statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    /// (offset, outcome) for every offset that was requested
    pub pages: Vec<(u32, PageOutcome)>,
    /// The crawl ended on an empty page before exhausting the offsets
    pub stopped_early: bool,
    pub total_records: usize,
}

impl CrawlSummary {
    pub fn pages_attempted(&self) -> usize {
        self.pages.len()
    }

    pub fn pages_succeeded(&self) -> usize {
        self.count(|outcome| matches!(outcome, PageOutcome::Parsed(_)))
    }

    pub fn pages_failed(&self) -> usize {
        self.count(|outcome| *outcome == PageOutcome::Failed)
    }

    pub fn pages_empty(&self) -> usize {
        self.count(|outcome| *outcome == PageOutcome::Empty)
    }

    /// Offsets whose request failed
    pub fn failed_offsets(&self) -> Vec<u32> {
        self.pages
            .iter()
            .filter(|(_, outcome)| *outcome == PageOutcome::Failed)
            .map(|(offset, _)| *offset)
            .collect()
    }

    fn count(&self, predicate: impl Fn(&PageOutcome) -> bool) -> usize {
        self.pages.iter().filter(|(_, outcome)| predicate(outcome)).count()
    }
}

/// Records in page-then-document order plus crawl statistics
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    pub records: Vec<MovieRecord>,
    pub summary: CrawlSummary,
}

/// Sequential crawler over the chart's pagination offsets
pub struct Top250Crawler<S> {
    source: S,
    parser: MovieListParser,
    config: CrawlerConfig,
}

impl<S: PageSource> Top250Crawler<S> {
    /// Create a crawler; the parser is built from the configured selectors by the caller
    pub fn new(source: S, parser: MovieListParser, config: CrawlerConfig) -> Self {
        Self {
            source,
            parser,
            config,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every page and extract all entries. Never fails; problems are
    /// reflected in the summary.
    pub async fn fetch_all(&self) -> CrawlOutcome {
        let mut outcome = CrawlOutcome::default();

        for (page_index, offset) in (0_u32..).zip(self.config.offsets()) {
            info!("Fetching start={} ...", offset);

            let body = match self.source.fetch_page(offset).await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Request failed for start={}: {}", offset, e);
                    outcome.summary.pages.push((offset, PageOutcome::Failed));
                    self.pause(self.config.failure_backoff()).await;
                    continue;
                }
            };

            let context = ParseContext::new(page_index, offset).with_expected_entries(self.config.page_size);
            let records = self.parser.parse_page(&body, &context);

            if records.is_empty() {
                outcome.summary.pages.push((offset, PageOutcome::Empty));
                if self.config.stop_on_empty_page {
                    warn!("No items found on page start={} - maybe blocked or page structure changed.", offset);
                    outcome.summary.stopped_early = true;
                    break;
                }
                warn!("No items found on page start={}, skipping", offset);
                self.pause(self.config.politeness_delay()).await;
                continue;
            }

            info!("Extracted {} entries from start={}", records.len(), offset);
            outcome.summary.pages.push((offset, PageOutcome::Parsed(records.len())));
            outcome.records.extend(records);

            self.pause(self.config.politeness_delay()).await;
        }

        outcome.summary.total_records = outcome.records.len();
        info!(
            "Crawl finished: {} records, {} pages ok, {} failed, {} empty{}",
            outcome.summary.total_records,
            outcome.summary.pages_succeeded(),
            outcome.summary.pages_failed(),
            outcome.summary.pages_empty(),
            if outcome.summary.stopped_early { " (stopped early)" } else { "" }
        );
        outcome
    }

    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}
