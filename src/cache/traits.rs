//! Cache traits and error types
//!
//! This module defines the trait interface for page cache backends and
//! associated error types.

use crate::cache::CachedPage;
use chrono::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt cache entry for {url}: {message}")]
    Corrupt { url: String, message: String },
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for page cache backends
///
/// Entries are keyed by URL and carry their own expiry. An expired entry is
/// never returned by `get`.
pub trait PageCache {
    /// Returns the cached body for `url` if an unexpired entry exists
    fn get(&self, url: &str) -> CacheResult<Option<String>>;

    /// Returns the full entry for `url`, expired or not
    fn get_entry(&self, url: &str) -> CacheResult<Option<CachedPage>>;

    /// Stores `body` under `url`, replacing any previous entry
    ///
    /// # Arguments
    ///
    /// * `url` - The cache key
    /// * `body` - The response body
    /// * `ttl` - How long the entry stays fresh
    fn put(&mut self, url: &str, body: &str, ttl: Duration) -> CacheResult<()>;

    /// Deletes expired entries, returning how many were removed
    fn purge_expired(&mut self) -> CacheResult<usize>;

    /// Deletes every entry, returning how many were removed
    fn clear(&mut self) -> CacheResult<usize>;

    /// Number of entries, expired ones included
    fn len(&self) -> CacheResult<u64>;

    fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.len()? == 0)
    }
}
