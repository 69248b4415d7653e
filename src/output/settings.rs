//! Settings file emitter

use crate::model::IndexSettings;
use crate::output::write_json;
use crate::RefIndexError;
use std::path::Path;

/// Writes the indexer settings as one JSON object
pub fn write_settings(settings: &IndexSettings, path: &Path) -> Result<(), RefIndexError> {
    write_json(settings, path)
}

pub fn read_settings(path: &Path) -> Result<IndexSettings, RefIndexError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_file_has_templates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boto3-setting.json");
        write_settings(&IndexSettings::default(), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        for key in ["title_field", "subtitle_field", "arg_field", "autocomplete_field"] {
            assert!(value[key].is_string(), "missing {}", key);
        }
        assert!(value["columns"].is_array());

        assert_eq!(read_settings(&path).unwrap(), IndexSettings::default());
    }
}
