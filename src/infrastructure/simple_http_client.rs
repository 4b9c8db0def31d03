//! HTTP client for fetching chart listing pages
//!
//! One GET per offset, fixed User-Agent, fixed timeout. Retries and
//! backoff are left to the crawler loop, which skips failed pages.

#![allow(clippy::uninlined_format_args)]

use crate::infrastructure::config::{CrawlerConfig, douban};
use crate::infrastructure::crawling::PageSource;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

/// Failures while fetching one listing page
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid listing URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP request failed for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status}: {url}")]
    Status { status: u16, url: String },

    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP client bound to one listing URL
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client from the crawler configuration
    pub fn with_config(config: &CrawlerConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| FetchError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = ClientBuilder::new()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self { client, base_url })
    }

    /// Listing URL for a pagination offset
    pub fn page_url(&self, offset: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(douban::OFFSET_PARAM, &offset.to_string());
        url
    }

    /// Fetch one listing page body
    pub async fn fetch_html_string(&self, offset: u32) -> Result<String, FetchError> {
        let url = self.page_url(offset);
        info!("🌐 HTTP GET: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("❌ HTTP error {}: {}", status, url);
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_page(&self, offset: u32) -> Result<String, FetchError> {
        self.fetch_html_string(offset).await
    }
}
