//! Zip archive extraction.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use log::debug;
use log::info;
use log::warn;
use zip::ZipArchive;
use zip::result::ZipError;

use super::cleanup::SourceCleanup;
use super::common::apply_permissions;
use super::common::create_directory;
use super::common::write_file;
use crate::ExtractConfig;
use crate::ExtractionReport;
use crate::LogpullError;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::types::DestDir;
use crate::types::SafePath;

/// Extracts a zip archive into `output_dir`.
///
/// The container is validated before anything touches the filesystem; a
/// file that is not a zip archive fails with
/// [`LogpullError::InvalidArchive`] and leaves the destination and the source
/// untouched. Once validation has passed:
///
/// - `output_dir` is created if missing
/// - entries are processed in container order
/// - entries whose name contains `..`, or is empty after stripping root
///   markers, are skipped with a warning
/// - files replace any existing file at their destination
/// - stored POSIX permissions are applied when
///   [`ExtractConfig::preserve_permissions`] is set (directory modes are
///   applied after all entries are written)
/// - with [`ExtractConfig::delete_source`] the archive is removed on every
///   exit path, success or error
///
/// The destination is assumed to have a single writer for the duration of
/// the call; no locking is performed.
///
/// # Errors
///
/// Returns an error if:
/// - the archive cannot be opened (`Io`)
/// - the file is not a valid zip container, or an entry is corrupt
///   (`InvalidArchive`)
/// - writing an entry or setting its permissions fails (`Io`)
///
/// # Examples
///
/// ```no_run
/// use logpull_core::ExtractConfig;
/// use logpull_core::extract_zip;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractConfig::default().with_delete_source(true);
/// let report = extract_zip("logs/logcat.dump.20160503082219.log.zip", "logs", &config)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_zip<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    let start = Instant::now();
    let archive_path = archive_path.as_ref();

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| match e {
        ZipError::Io(io_err) => LogpullError::Io(io_err),
        other => LogpullError::InvalidArchive(format!(
            "{} is not a zip file: {other}",
            archive_path.display()
        )),
    })?;

    // Declared before the entries are extracted so it drops after the reader
    let cleanup = SourceCleanup::new(archive_path, config.delete_source);

    info!(
        "extracting {} ({} entries) into {}",
        archive_path.display(),
        archive.len(),
        output_dir.as_ref().display()
    );

    let modes = if config.preserve_permissions {
        let mut raw = BufReader::new(File::open(archive_path)?);
        stored_modes(&mut archive, &mut raw)?
    } else {
        Vec::new()
    };

    let mut report = extract_entries(archive, &modes, output_dir.as_ref(), config)?;
    report.source_deleted = cleanup.finish();
    report.duration = start.elapsed();

    Ok(report)
}

fn extract_entries<R: Read + Seek>(
    mut archive: ZipArchive<R>,
    modes: &[u32],
    output_dir: &Path,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    let dest = DestDir::create(output_dir)?;
    let mut report = ExtractionReport::new();
    report.destination = dest.as_path().to_path_buf();

    let mut copy_buffer = CopyBuffer::new();
    let mut directory_modes: Vec<(PathBuf, u32)> = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| entry_error(e, index))?;
        let name = entry.name().to_owned();

        let safe_path = match SafePath::from_entry_name(&name, config.max_path_depth) {
            Ok(safe_path) => safe_path,
            Err(reason) => {
                warn!("skipping archive entry {name:?}: {reason}");
                report.entries_skipped += 1;
                report.add_warning(format!("skipped {name}: {reason}"));
                continue;
            }
        };

        let mode = modes.get(index).copied().filter(|&mode| mode != 0);
        let output_path = dest.join(&safe_path);

        if is_directory_name(&name) {
            debug!("creating directory {}", output_path.display());
            create_directory(&output_path)?;
            report.directories_created += 1;
            if let Some(mode) = mode {
                directory_modes.push((output_path, mode));
            }
        } else {
            debug!("writing {}", output_path.display());
            let written = write_file(&mut entry, &output_path, &mut copy_buffer)?;
            report.files_extracted += 1;
            report.bytes_written = report.bytes_written.saturating_add(written);
            if let Some(mode) = mode
                && apply_permissions(&output_path, mode)?
            {
                report.permissions_applied += 1;
            }
        }
    }

    // Deepest first, so a read-only parent does not block its children
    for (path, mode) in directory_modes.iter().rev() {
        if apply_permissions(path, *mode)? {
            report.permissions_applied += 1;
        }
    }

    Ok(report)
}

/// Central directory file header signature.
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
/// Offset of the external attributes field within a central directory header.
const EXTERNAL_ATTRIBUTES_OFFSET: usize = 38;

/// Returns the POSIX mode recorded for each entry, in container order.
///
/// The mode lives in the upper 16 bits of the raw external attributes; zero
/// means none was recorded. The attributes are read from the central
/// directory through `raw` because `ZipFile::unix_mode` synthesizes a mode
/// from DOS attribute bits.
fn stored_modes<R: Read + Seek, S: Read + Seek>(
    archive: &mut ZipArchive<R>,
    raw: &mut S,
) -> Result<Vec<u32>> {
    let mut modes = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let offset = archive
            .by_index_raw(index)
            .map_err(|e| entry_error(e, index))?
            .central_header_start();

        let mut header = [0u8; EXTERNAL_ATTRIBUTES_OFFSET + 4];
        raw.seek(SeekFrom::Start(offset))?;
        raw.read_exact(&mut header)?;

        let signature = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        if signature != CENTRAL_HEADER_SIGNATURE {
            return Err(LogpullError::InvalidArchive(format!(
                "entry {index} has no central directory header at offset {offset}"
            )));
        }

        let field = &header[EXTERNAL_ATTRIBUTES_OFFSET..];
        let attributes = u32::from_le_bytes([field[0], field[1], field[2], field[3]]);
        modes.push(attributes >> 16);
    }

    Ok(modes)
}

/// Directory entries are marked by a trailing separator in the stored name.
fn is_directory_name(name: &str) -> bool {
    name.ends_with('/') || name.ends_with('\\')
}

fn entry_error(err: ZipError, index: usize) -> LogpullError {
    match err {
        ZipError::Io(io_err) => LogpullError::Io(io_err),
        other => LogpullError::InvalidArchive(format!("failed to read entry {index}: {other}")),
    }
}
