//! Installer for pre-built indexes
//!
//! Instead of scraping, the installer downloads the latest published
//! release archive, extracts it, and places the data and settings files
//! where the search plugin reads them. Every step is fatal on failure; the
//! release listing is checked before anything is written.

mod archive;
mod release;

pub use archive::{extract_archive, require_files};
pub use release::{download_asset, fetch_releases, select_asset, Release, ReleaseAsset};

use crate::config::Config;
use crate::crawler::build_http_client;
use crate::output::remove_stale_index;
use crate::RefIndexError;
use std::path::PathBuf;

/// What an install run did
#[derive(Debug, Clone)]
pub struct InstallSummary {
    /// URL of the downloaded archive
    pub asset_url: String,

    /// Files copied into the plugin directory
    pub installed: Vec<PathBuf>,

    /// Whether a stale index directory was removed
    pub removed_stale_index: bool,
}

/// Runs a complete install
///
/// 1. Find the first asset of the latest release
/// 2. Download it into the working directory and extract it there
/// 3. Copy the data and settings files into the plugin directory
/// 4. Remove the plugin's stale index
pub async fn run_install(config: &Config) -> Result<InstallSummary, RefIndexError> {
    let work_dir = config.work_dir()?;
    let fts_dir = config.fts_dir()?;
    let client = build_http_client(&config.source.user_agent)?;

    tracing::info!("Find the latest release asset ...");
    let releases = fetch_releases(&client, &config.install.releases_url).await?;
    let asset = select_asset(&releases, &config.install.releases_url)?;
    tracing::info!("Found {}", asset.short_name());

    std::fs::create_dir_all(&work_dir)?;
    let archive_path = work_dir.join(&config.install.archive_name);
    tracing::info!(
        "Downloading {} to {} ...",
        asset.browser_download_url,
        archive_path.display()
    );
    let bytes = download_asset(&client, &asset.browser_download_url, &archive_path).await?;
    tracing::debug!("Downloaded {} bytes", bytes);

    tracing::info!("Extracting {} ...", archive_path.display());
    let entries = extract_archive(&archive_path, &work_dir)?;
    tracing::debug!("Extracted {} entries", entries);

    let names = vec![config.data_file_name(), config.setting_file_name()];
    require_files(&work_dir, &names)?;

    tracing::info!("Copying setting and data files to {} ...", fts_dir.display());
    std::fs::create_dir_all(&fts_dir)?;
    let mut installed = Vec::with_capacity(names.len());
    for name in &names {
        let dest = fts_dir.join(name);
        std::fs::copy(work_dir.join(name), &dest)?;
        installed.push(dest);
    }

    let removed_stale_index = remove_stale_index(&fts_dir.join(config.index_dir_name()))?;
    if removed_stale_index {
        tracing::info!("Removed stale search index");
    }

    Ok(InstallSummary {
        asset_url: asset.browser_download_url.clone(),
        installed,
        removed_stale_index,
    })
}
