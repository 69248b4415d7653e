use crate::config::types::{CacheConfig, Config, InstallConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_dataset(&config.dataset)?;
    validate_source_config(&config.source)?;
    validate_cache_config(&config.cache)?;
    validate_install_config(&config.install)?;
    Ok(())
}

/// The dataset name ends up in file names, so keep it to a safe alphabet
fn validate_dataset(dataset: &str) -> Result<(), ConfigError> {
    if dataset.is_empty() {
        return Err(ConfigError::Validation("dataset cannot be empty".to_string()));
    }

    if !dataset
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "dataset must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            dataset
        )));
    }

    Ok(())
}

fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_http_url("index-url", &config.index_url)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "cache directory cannot be empty".to_string(),
        ));
    }

    if config.expire_hours < 1 {
        return Err(ConfigError::Validation(format!(
            "expire-hours must be >= 1, got {}",
            config.expire_hours
        )));
    }

    Ok(())
}

fn validate_install_config(config: &InstallConfig) -> Result<(), ConfigError> {
    validate_http_url("releases-url", &config.releases_url)?;

    if config.archive_name.is_empty() || config.archive_name.contains('/') {
        return Err(ConfigError::Validation(format!(
            "archive-name must be a plain file name, got '{}'",
            config.archive_name
        )));
    }

    Ok(())
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            field,
            url.scheme()
        )));
    }

    Ok(())
}
