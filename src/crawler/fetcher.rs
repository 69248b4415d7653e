//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building HTTP clients with the configured user agent
//! - Plain GET requests that fail on any non-2xx status
//! - Cache-first fetching through a `PageCache`
//!
//! There is no retry logic. A failed request aborts the build, which can
//! simply be run again; pages fetched so far stay cached.

use crate::cache::PageCache;
use crate::RefIndexError;
use chrono::Duration;
use reqwest::Client;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use boto3_ref_index::crawler::build_http_client;
///
/// let client = build_http_client("boto3-ref-index/0.1").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches `url` and returns the response body as text
///
/// # Returns
///
/// * `Ok(String)` - The body of a 2xx response
/// * `Err(RefIndexError::Http)` - Connection, TLS, or body read failure
/// * `Err(RefIndexError::HttpStatus)` - Any non-2xx status
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, RefIndexError> {
    let response = client.get(url).send().await.map_err(|source| RefIndexError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(RefIndexError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| RefIndexError::Http {
        url: url.to_string(),
        source,
    })
}

/// Counters for cache effectiveness during one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    pub cache_hits: u64,
    pub network_fetches: u64,
}

/// An HTTP client that answers from a page cache when it can
///
/// Successful responses are stored with a fixed time-to-live. Failed
/// responses are never cached.
pub struct CachedFetcher<C: PageCache> {
    client: Client,
    cache: C,
    ttl: Duration,
    stats: FetchStats,
}

impl<C: PageCache> CachedFetcher<C> {
    pub fn new(client: Client, cache: C, ttl: Duration) -> Self {
        Self {
            client,
            cache,
            ttl,
            stats: FetchStats::default(),
        }
    }

    /// Returns the page body, from the cache if fresh, otherwise from the network
    pub async fn fetch(&mut self, url: &str) -> Result<String, RefIndexError> {
        if let Some(body) = self.cache.get(url)? {
            tracing::debug!("Cache hit: {}", url);
            self.stats.cache_hits += 1;
            return Ok(body);
        }

        tracing::debug!("Fetching: {}", url);
        let body = fetch_text(&self.client, url).await?;
        self.stats.network_fetches += 1;
        self.cache.put(url, &body, self.ttl)?;
        Ok(body)
    }

    pub fn stats(&self) -> FetchStats {
        self.stats
    }
}
