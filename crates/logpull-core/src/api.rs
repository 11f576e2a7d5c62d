//! High-level convenience entry points.

use std::path::Path;
use std::path::PathBuf;

use crate::ExtractConfig;
use crate::Result;
use crate::extraction::extract_zip;

/// Extracts `archive_path` into `destination` with default settings.
///
/// Returns the canonical destination directory. When `delete_source` is set,
/// the archive is removed after extraction runs, whether or not it succeeded,
/// as long as the file was a readable zip container.
///
/// # Errors
///
/// Returns an error if:
/// - the archive cannot be opened (`Io`)
/// - the file is not a zip container (`InvalidArchive`)
/// - an entry cannot be written (`Io`)
///
/// # Examples
///
/// ```no_run
/// use logpull_core::extract;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = extract("logcat.dump.20160503082219.log.zip", "logs", true)?;
/// println!("extracted into {}", dest.display());
/// # Ok(())
/// # }
/// ```
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    destination: Q,
    delete_source: bool,
) -> Result<PathBuf> {
    let config = ExtractConfig::default().with_delete_source(delete_source);
    let report = extract_zip(archive_path, destination, &config)?;
    Ok(report.destination)
}
