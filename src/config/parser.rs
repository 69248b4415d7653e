use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Keys missing from the file fall back to their defaults, so an empty file
/// is a valid configuration.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use boto3_ref_index::config::load_config;
///
/// let config = load_config(Path::new("boto3-ref-index.toml")).unwrap();
/// println!("Index page: {}", config.source.index_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two builds can be told apart by their settings.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Loads a configuration and returns both the config and its hash
///
/// Without a path the built-in defaults are used and the hash is that of
/// the empty document.
pub fn load_config_with_hash(path: Option<&Path>) -> Result<(Config, String), ConfigError> {
    match path {
        Some(path) => {
            let config = load_config(path)?;
            let hash = compute_config_hash(path)?;
            Ok((config, hash))
        }
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok((config, hash_content("")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
dataset = "boto3"

[source]
index-url = "https://docs.example.com/services/index.html"
user-agent = "TestBot/1.0"

[cache]
directory = "/tmp/test-cache"
expire-hours = 12

[output]
services-path = "./services.json"
directory = "/tmp/fts"

[install]
releases-url = "https://api.example.com/releases?per_page=1"
archive-name = "data.zip"
work-dir = "/tmp/work"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.dataset, "boto3");
        assert_eq!(
            config.source.index_url,
            "https://docs.example.com/services/index.html"
        );
        assert_eq!(config.cache.expire_hours, 12);
        assert_eq!(config.output.directory.as_deref(), Some("/tmp/fts"));
        assert_eq!(config.install.archive_name, "data.zip");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let file = create_temp_config("[cache]\nexpire-hours = 6\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.cache.expire_hours, 6);
        assert_eq!(config.cache.directory, ".cache");
        assert_eq!(config.dataset, "boto3");
        assert_eq!(config.output.services_path, "build/services.json");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[cache]\nexpire-hours = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_defaults_without_path() {
        let (config, hash) = load_config_with_hash(None).unwrap();
        assert_eq!(config.dataset, "boto3");
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("dataset = \"one\"");
        let file2 = create_temp_config("dataset = \"two\"");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
        assert_eq!(hash1, compute_config_hash(file1.path()).unwrap());
    }
}
