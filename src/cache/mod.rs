//! Page cache module
//!
//! Fetched documentation pages are kept in a SQLite database keyed by URL,
//! each entry with a fixed expiry, so repeated builds within a day do not
//! download the same pages again.

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqlitePageCache;
pub use traits::{CacheError, CacheResult, PageCache};

use chrono::{DateTime, Utc};
use std::path::Path;

/// Default time a fetched page stays fresh
pub const DEFAULT_TTL_HOURS: u32 = 24;

/// Opens or creates the page cache database
pub fn open_cache(path: &Path) -> CacheResult<SqlitePageCache> {
    SqlitePageCache::new(path)
}

/// A cached response body
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub url: String,
    pub body: String,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CachedPage {
    /// Checks if the entry has passed its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
