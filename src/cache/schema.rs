//! Database schema for the page cache

/// SQL schema for the cache database
pub const SCHEMA_SQL: &str = r#"
-- One row per fetched URL
CREATE TABLE IF NOT EXISTS pages (
    url TEXT PRIMARY KEY,
    body TEXT NOT NULL,
    fetched_at TEXT NOT NULL,
    expires_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_pages_expires_at ON pages(expires_at);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
