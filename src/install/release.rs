//! Release listing and asset download

use crate::crawler::fetch_text;
use crate::RefIndexError;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;

/// One entry of the release listing
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag_name: Option<String>,

    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    fn label(&self) -> String {
        self.tag_name.clone().unwrap_or_else(|| "<untagged>".to_string())
    }
}

/// A downloadable file attached to a release
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    #[serde(default)]
    pub name: Option<String>,

    pub browser_download_url: String,
}

impl ReleaseAsset {
    /// Last two path segments of the download URL, e.g. `v1.0/data.zip`
    pub fn short_name(&self) -> String {
        let segments: Vec<&str> = self.browser_download_url.rsplitn(3, '/').collect();
        match segments.as_slice() {
            [file, tag, _] => format!("{}/{}", tag, file),
            _ => self.browser_download_url.clone(),
        }
    }
}

/// Fetches and parses the release listing
pub async fn fetch_releases(client: &Client, url: &str) -> Result<Vec<Release>, RefIndexError> {
    let body = fetch_text(client, url).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Picks the first asset of the most recent release
///
/// # Returns
///
/// * `Err(RefIndexError::NoRelease)` - The listing is empty
/// * `Err(RefIndexError::NoReleaseAsset)` - The latest release has no assets
pub fn select_asset<'a>(
    releases: &'a [Release],
    listing_url: &str,
) -> Result<&'a ReleaseAsset, RefIndexError> {
    let release = releases.first().ok_or_else(|| RefIndexError::NoRelease {
        url: listing_url.to_string(),
    })?;

    release
        .assets
        .first()
        .ok_or_else(|| RefIndexError::NoReleaseAsset {
            release: release.label(),
        })
}

/// Downloads `url` into the file at `dest`, returning the number of bytes written
pub async fn download_asset(client: &Client, url: &str, dest: &Path) -> Result<u64, RefIndexError> {
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

    let bytes = response.bytes().await.map_err(|source| RefIndexError::Http {
        url: url.to_string(),
        source,
    })?;
    std::fs::write(dest, &bytes)?;
    Ok(bytes.len() as u64)
}
