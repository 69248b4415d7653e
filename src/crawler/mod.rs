//! Crawler module for documentation fetching and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching through the page cache
//! - HTML parsing of the index and service pages
//! - The two-phase crawl coordination
//! - The `run_build` entry point that writes all output files

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{Coordinator, CrawlOutput};
pub use fetcher::{build_http_client, fetch_text, CachedFetcher, FetchStats};
pub use parser::{
    parse_operation_links, parse_service_id, parse_service_index, parse_service_operations,
    OperationLink,
};

use crate::cache::{open_cache, PageCache};
use crate::config::Config;
use crate::model::IndexSettings;
use crate::output::{
    remove_stale_index, write_documents, write_services, write_settings, BuildSummary,
};
use crate::RefIndexError;
use url::Url;

/// Options for a single build
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Drop every cached page before crawling
    pub fresh: bool,
}

/// Runs a complete build
///
/// This is the main entry point for building the index. It will:
/// 1. Open the page cache and drop expired (or, when fresh, all) entries
/// 2. Discover services from the index page
/// 3. Resolve every service identifier and write the services file
/// 4. Extract documents and write the data and settings files
/// 5. Remove the plugin's stale index so it rebuilds from the new data
pub async fn run_build(config: &Config, options: BuildOptions) -> Result<BuildSummary, RefIndexError> {
    let mut cache = open_cache(&config.cache_path()?)?;
    if options.fresh {
        let removed = cache.clear()?;
        tracing::info!("Cleared {} cached pages", removed);
    } else {
        let removed = cache.purge_expired()?;
        if removed > 0 {
            tracing::info!("Purged {} expired cached pages", removed);
        }
    }

    let client = build_http_client(&config.source.user_agent)?;
    let ttl = chrono::Duration::hours(i64::from(config.cache.expire_hours));
    let fetcher = CachedFetcher::new(client, cache, ttl);
    let index_url = Url::parse(&config.source.index_url)?;
    let mut coordinator = Coordinator::new(index_url, fetcher);

    let mut services = coordinator.discover_services().await?;
    coordinator.resolve_service_ids(&mut services).await?;

    let services_path = config.services_path()?;
    write_services(&services, &services_path)?;
    tracing::info!("Wrote {} services to {}", services.len(), services_path.display());

    let documents = coordinator.extract_documents(&services).await?;

    let fts_dir = config.fts_dir()?;
    let data_path = fts_dir.join(config.data_file_name());
    let setting_path = fts_dir.join(config.setting_file_name());
    write_documents(&documents, &data_path)?;
    tracing::info!("Wrote {} documents to {}", documents.len(), data_path.display());
    write_settings(&IndexSettings::default(), &setting_path)?;
    tracing::info!("Wrote index settings to {}", setting_path.display());

    if remove_stale_index(&fts_dir.join(config.index_dir_name()))? {
        tracing::info!("Removed stale search index");
    }

    let output = CrawlOutput {
        services,
        documents,
    };
    Ok(BuildSummary::from_crawl(
        &output,
        coordinator.fetch_stats(),
        data_path,
        setting_path,
    ))
}
