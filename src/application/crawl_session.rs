//! Crawl session use case
//!
//! Wires configuration, page source, crawler and exporter together. The
//! crawl itself never fails; only setup and the final write can.

#![allow(clippy::uninlined_format_args)]

use crate::domain::movie::{MovieRecord, MovieRow};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::crawling::{CrawlSummary, PageSource, Top250Crawler};
use crate::infrastructure::csv_export::CsvExporter;
use crate::infrastructure::parsing::MovieListParser;
use crate::infrastructure::simple_http_client::HttpClient;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

/// Result of one complete crawl-and-export run
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub summary: CrawlSummary,
    pub records_written: usize,
    pub output_path: PathBuf,
    pub preview: Vec<MovieRow>,
}

pub struct CrawlSession {
    config: AppConfig,
}

impl CrawlSession {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Crawl the live chart over HTTP and export it
    pub async fn run(&self) -> Result<SessionReport> {
        self.config
            .crawler
            .validate()
            .context("Invalid crawler configuration")?;
        let client = HttpClient::with_config(&self.config.crawler).context("Failed to create HTTP client")?;
        self.run_with_source(client).await
    }

    /// Crawl from any page source and export it
    pub async fn run_with_source<S: PageSource>(&self, source: S) -> Result<SessionReport> {
        let parser = MovieListParser::with_config(&self.config.selectors)
            .context("Failed to create listing parser")?;
        let crawler = Top250Crawler::new(source, parser, self.config.crawler.clone());

        let outcome = crawler.fetch_all().await;

        let output_path = self.config.export.output_path.clone();
        let records_written = CsvExporter::new()
            .write(&outcome.records, &output_path)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        let preview = preview_rows(&outcome.records, self.config.export.preview_rows);
        log_preview(&preview);

        Ok(SessionReport {
            summary: outcome.summary,
            records_written,
            output_path,
            preview,
        })
    }
}

/// First `limit` records as export rows
pub fn preview_rows(records: &[MovieRecord], limit: usize) -> Vec<MovieRow> {
    records.iter().take(limit).map(MovieRow::from).collect()
}

fn log_preview(rows: &[MovieRow]) {
    for (index, row) in rows.iter().enumerate() {
        info!(
            "{:>3} | {} | {} | {} | {} | {}",
            index + 1,
            row.title,
            row.year,
            row.rating.map(|r| r.to_string()).unwrap_or_default(),
            row.num_ratings.map(|n| n.to_string()).unwrap_or_default(),
            row.tail
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::simple_http_client::FetchError;
    use async_trait::async_trait;
    use tempfile::tempdir;

    struct OnePage;

    #[async_trait]
    impl PageSource for OnePage {
        async fn fetch_page(&self, offset: u32) -> Result<String, FetchError> {
            if offset == 0 {
                Ok(r#"<div class="item"><div class="hd"><span class="title">千与千寻</span></div>
                    <div class="bd"><p>导演: 宫崎骏<br>2001 / 日本 / 剧情 动画 奇幻</p>
                    <div><span class="rating_num">9.4</span><span>2,345,678人评价</span></div></div></div>"#
                    .to_string())
            } else {
                Ok("<html><body></body></html>".to_string())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_writes_csv_and_preview() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.export.output_path = dir.path().join("top250.csv");

        let report = CrawlSession::new(config).run_with_source(OnePage).await.unwrap();

        assert_eq!(report.records_written, 1);
        assert!(report.summary.stopped_early);
        assert!(report.output_path.exists());
        assert_eq!(report.preview.len(), 1);
        assert_eq!(report.preview[0].rating, Some(9.4));
        assert_eq!(report.preview[0].num_ratings, Some(2_345_678));
        assert_eq!(report.preview[0].tail, "日本 / 剧情 动画 奇幻");
    }

    #[tokio::test]
    async fn test_invalid_selectors_fail_setup() {
        let mut config = AppConfig::default();
        config.selectors.entry = "div[".to_string();

        let result = CrawlSession::new(config).run_with_source(OnePage).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_preview_limit() {
        let records = vec![MovieRecord::default(); 8];
        assert_eq!(preview_rows(&records, 5).len(), 5);
        assert_eq!(preview_rows(&records[..2], 5).len(), 2);
    }
}
