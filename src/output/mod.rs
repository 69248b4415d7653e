//! Output module for the files the search plugin consumes
//!
//! This module handles:
//! - Building `DocumentRecord`s from extracted operation links
//! - Writing the services, data and settings JSON files
//! - Removing the plugin's stale index directory
//! - Summarizing a build
//!
//! Every write replaces the previous file entirely.

mod documents;
mod settings;
pub mod stats;

pub use documents::{build_documents, read_documents, write_documents, write_services};
pub use settings::{read_settings, write_settings};
pub use stats::{print_summary, BuildSummary};

use crate::RefIndexError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `value` as pretty-printed JSON, creating parent directories
pub(crate) fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), RefIndexError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Deletes the plugin's index directory so it is rebuilt on next use
///
/// # Returns
///
/// * `Ok(true)` - The directory existed and was removed
/// * `Ok(false)` - There was nothing to remove
pub fn remove_stale_index(index_dir: &Path) -> Result<bool, RefIndexError> {
    match std::fs::remove_dir_all(index_dir) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
