//! SQLite cache implementation
//!
//! This module provides a SQLite-based implementation of the PageCache trait.

use crate::cache::schema::initialize_schema;
use crate::cache::traits::{CacheError, CacheResult, PageCache};
use crate::cache::CachedPage;
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite page cache
pub struct SqlitePageCache {
    conn: Connection,
}

impl SqlitePageCache {
    /// Opens or creates the cache database at `path`
    ///
    /// Missing parent directories are created.
    pub fn new(path: &Path) -> CacheResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory cache (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> CacheResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn put_at(
        &mut self,
        url: &str,
        body: &str,
        fetched_at: DateTime<Utc>,
        ttl: Duration,
    ) -> CacheResult<()> {
        let expires_at = fetched_at + ttl;
        self.conn.execute(
            "INSERT OR REPLACE INTO pages (url, body, fetched_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
            params![url, body, fetched_at.to_rfc3339(), expires_at.to_rfc3339()],
        )?;
        Ok(())
    }
}

fn parse_timestamp(url: &str, value: &str) -> CacheResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CacheError::Corrupt {
            url: url.to_string(),
            message: format!("bad timestamp '{}': {}", value, e),
        })
}

impl PageCache for SqlitePageCache {
    fn get(&self, url: &str) -> CacheResult<Option<String>> {
        // Timestamps are compared as parsed values, not as strings
        match self.get_entry(url)? {
            Some(entry) if !entry.is_expired() => Ok(Some(entry.body)),
            _ => Ok(None),
        }
    }

    fn get_entry(&self, url: &str) -> CacheResult<Option<CachedPage>> {
        let row: Option<(String, String, String)> = self
            .conn
            .query_row(
                "SELECT body, fetched_at, expires_at FROM pages WHERE url = ?1",
                params![url],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        match row {
            Some((body, fetched_at, expires_at)) => Ok(Some(CachedPage {
                url: url.to_string(),
                body,
                fetched_at: parse_timestamp(url, &fetched_at)?,
                expires_at: parse_timestamp(url, &expires_at)?,
            })),
            None => Ok(None),
        }
    }

    fn put(&mut self, url: &str, body: &str, ttl: Duration) -> CacheResult<()> {
        self.put_at(url, body, Utc::now(), ttl)
    }

    fn purge_expired(&mut self) -> CacheResult<usize> {
        let now = Utc::now();
        let mut stmt = self.conn.prepare("SELECT url, expires_at FROM pages")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        drop(stmt);

        let mut removed = 0;
        for (url, expires_at) in rows {
            // Unreadable timestamps are treated as expired
            let expired = parse_timestamp(&url, &expires_at)
                .map(|at| at <= now)
                .unwrap_or(true);
            if expired {
                removed += self
                    .conn
                    .execute("DELETE FROM pages WHERE url = ?1", params![url])?;
            }
        }

        Ok(removed)
    }

    fn clear(&mut self) -> CacheResult<usize> {
        Ok(self.conn.execute("DELETE FROM pages", [])?)
    }

    fn len(&self) -> CacheResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
