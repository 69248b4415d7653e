use crate::cache::DEFAULT_TTL_HOURS;
use crate::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default boto3 services index page
pub const DEFAULT_INDEX_URL: &str =
    "https://boto3.amazonaws.com/v1/documentation/api/latest/reference/services/index.html";

/// Default release listing for pre-built indexes
pub const DEFAULT_RELEASES_URL: &str =
    "https://api.github.com/repos/MacHu-GWU/alfred-python-boto3-ref/releases?per_page=1";

/// Plugin configuration directory, relative to the home directory
pub const FTS_DIR: &str = ".alfred-afwf/afwf_fts_anything";

/// Main configuration structure for boto3-ref-index
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset name used to derive output file names
    pub dataset: String,
    pub source: SourceConfig,
    pub cache: CacheConfig,
    pub output: OutputConfig,
    pub install: InstallConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: "boto3".to_string(),
            source: SourceConfig::default(),
            cache: CacheConfig::default(),
            output: OutputConfig::default(),
            install: InstallConfig::default(),
        }
    }
}

impl Config {
    /// Directory the plugin reads its data and settings from
    pub fn fts_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.output.directory {
            Some(dir) => expand_home(dir),
            None => Ok(dirs::home_dir()
                .ok_or(ConfigError::HomeDirUnavailable)?
                .join(FTS_DIR)),
        }
    }

    /// File name of the document corpus
    pub fn data_file_name(&self) -> String {
        format!("{}-data.json", self.dataset)
    }

    /// File name of the index settings
    pub fn setting_file_name(&self) -> String {
        format!("{}-setting.json", self.dataset)
    }

    /// Directory name of the index the plugin builds from the data file
    pub fn index_dir_name(&self) -> String {
        format!("{}-whoosh_index", self.dataset)
    }

    /// Path of the SQLite page cache
    pub fn cache_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(expand_home(&self.cache.directory)?.join("http_cache.sqlite3"))
    }

    /// Path of the intermediate services file
    pub fn services_path(&self) -> Result<PathBuf, ConfigError> {
        expand_home(&self.output.services_path)
    }

    /// Directory the installer downloads and extracts into
    pub fn work_dir(&self) -> Result<PathBuf, ConfigError> {
        expand_home(&self.install.work_dir)
    }
}

/// Where the documentation is scraped from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Services index page
    #[serde(rename = "index-url")]
    pub index_url: String,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            user_agent: format!("boto3-ref-index/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Page cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding the cache database
    pub directory: String,

    /// Hours a fetched page stays fresh
    #[serde(rename = "expire-hours")]
    pub expire_hours: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: ".cache".to_string(),
            expire_hours: DEFAULT_TTL_HOURS,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the intermediate services file
    #[serde(rename = "services-path")]
    pub services_path: String,

    /// Overrides the plugin configuration directory
    pub directory: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            services_path: "build/services.json".to_string(),
            directory: None,
        }
    }
}

/// Installer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Release listing endpoint
    #[serde(rename = "releases-url")]
    pub releases_url: String,

    /// File name the downloaded archive is saved as
    #[serde(rename = "archive-name")]
    pub archive_name: String,

    /// Directory the archive is downloaded and extracted into
    #[serde(rename = "work-dir")]
    pub work_dir: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            archive_name: "python-boto3-data.zip".to_string(),
            work_dir: ".".to_string(),
        }
    }
}

/// Resolves a leading `~` against the home directory
pub fn expand_home(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable);
    }
    match path.strip_prefix("~/") {
        Some(rest) => Ok(dirs::home_dir()
            .ok_or(ConfigError::HomeDirUnavailable)?
            .join(rest)),
        None => Ok(Path::new(path).to_path_buf()),
    }
}
