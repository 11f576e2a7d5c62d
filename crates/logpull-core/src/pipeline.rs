//! Folder-level steps of the fetch flow.

use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use log::info;
use walkdir::WalkDir;

use crate::ExtractConfig;
use crate::ProgressCallback;
use crate::Result;
use crate::UnpackReport;
use crate::extraction::extract_zip;

/// Removes the directory tree at `path`.
///
/// Returns `true` if something was removed and `false` if nothing was there,
/// so calling it twice is harmless.
///
/// # Errors
///
/// Returns an I/O error if the tree exists but cannot be removed.
pub fn reset_dir<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();

    match std::fs::remove_dir_all(path) {
        Ok(()) => {
            debug!("removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Extracts every `*.zip` file found under `folder` into `folder` itself.
///
/// Archives are collected before any of them is extracted, so files unpacked
/// along the way are not revisited. For `x.log.zip`, a file already present
/// at `x.log` (next to the archive) is removed first. With
/// `config.delete_source`, each archive is removed once its extraction has
/// run.
///
/// # Errors
///
/// Stops at the first archive that fails to extract and returns its error.
/// Archives handled before it stay extracted.
///
/// # Examples
///
/// ```no_run
/// use logpull_core::ExtractConfig;
/// use logpull_core::NoopProgress;
/// use logpull_core::pipeline::unpack_all;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractConfig::default().with_delete_source(true);
/// let report = unpack_all("logs", &config, &mut NoopProgress)?;
/// println!("unpacked {} archives", report.archives.len());
/// # Ok(())
/// # }
/// ```
pub fn unpack_all<P: AsRef<Path>>(
    folder: P,
    config: &ExtractConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<UnpackReport> {
    let folder = folder.as_ref();
    let archives = find_archives(folder)?;
    let total = archives.len();
    let mut report = UnpackReport::default();

    info!("unpacking {total} archives in {}", folder.display());

    for (index, archive) in archives.into_iter().enumerate() {
        progress.on_entry_start(&archive, total, index + 1);

        let stale = archive.with_extension("");
        if stale.is_file() {
            debug!("removing stale {}", stale.display());
            std::fs::remove_file(&stale)?;
            report.stale_removed.push(stale);
        }

        let extraction = extract_zip(&archive, folder, config)?;
        progress.on_bytes_written(extraction.bytes_written);
        progress.on_entry_complete(&archive);
        report.absorb(archive, extraction);
    }

    progress.on_complete();
    Ok(report)
}

fn find_archives(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut archives = Vec::new();

    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "zip")
        {
            archives.push(entry.into_path());
        }
    }

    Ok(archives)
}
