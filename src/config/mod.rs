//! Configuration module for boto3-ref-index
//!
//! Every setting has a default, so the tool runs without a configuration
//! file. A TOML file can override any subset of the defaults.
//!
//! # Example
//!
//! ```no_run
//! use boto3_ref_index::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("boto3-ref-index.toml")).unwrap();
//! println!("Pages stay cached for {} hours", config.cache.expire_hours);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    expand_home, CacheConfig, Config, InstallConfig, OutputConfig, SourceConfig,
    DEFAULT_INDEX_URL, DEFAULT_RELEASES_URL, FTS_DIR,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
