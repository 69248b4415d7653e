//! Release archive extraction

use crate::RefIndexError;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

/// Extracts every entry of the zip archive at `archive` into `dest`
///
/// Entries whose names would escape `dest` are rejected by the zip crate.
/// Returns the number of entries in the archive.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<usize, RefIndexError> {
    let mut zip = ZipArchive::new(File::open(archive)?)?;
    let entries = zip.len();
    std::fs::create_dir_all(dest)?;
    zip.extract(dest)?;
    Ok(entries)
}

/// Checks that every expected file exists in `dir`
///
/// Returns the first missing one as `MissingArchiveFile`.
pub fn require_files(dir: &Path, names: &[String]) -> Result<(), RefIndexError> {
    for name in names {
        let path = dir.join(name);
        if !path.is_file() {
            return Err(RefIndexError::MissingArchiveFile {
                path: path.display().to_string(),
            });
        }
    }
    Ok(())
}
