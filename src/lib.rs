//! boto3-ref-index: a search index builder for the boto3 API reference
//!
//! This crate scrapes the boto3 service documentation, turns every client
//! operation and paginator into a search document, and writes the document
//! corpus plus a field configuration for an external full-text-search plugin.
//! It also ships an installer that fetches a pre-built release instead.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod install;
pub mod model;
pub mod output;

use thiserror::Error;

/// Main error type for boto3-ref-index operations
#[derive(Debug, Error)]
pub enum RefIndexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("No release found at {url}")]
    NoRelease { url: String },

    #[error("Release {release} has no downloadable asset")]
    NoReleaseAsset { release: String },

    #[error("Expected file missing after extraction: {path}")]
    MissingArchiveFile { path: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Could not resolve the home directory")]
    HomeDirUnavailable,
}

/// Result type alias for boto3-ref-index operations
pub type Result<T> = std::result::Result<T, RefIndexError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{DocumentRecord, IndexSettings, OperationKind, ServiceDescriptor};
