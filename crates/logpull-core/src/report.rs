//! Operation reporting and progress callbacks.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Report of a zip extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Canonical destination directory the entries were written to.
    pub destination: PathBuf,

    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directory entries materialized.
    pub directories_created: usize,

    /// Number of entries skipped because their path was unsafe.
    pub entries_skipped: usize,

    /// Number of entries whose stored permissions were applied.
    pub permissions_applied: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Whether the source archive was removed.
    pub source_deleted: bool,

    /// Duration of the extraction.
    pub duration: Duration,

    /// Warnings generated during extraction (one per skipped entry).
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns the number of entries written to disk.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Report of a fragment merge.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    /// The surviving fragment that now holds the merged content.
    pub target: PathBuf,

    /// Number of fragments found, including the target.
    pub fragments_merged: usize,

    /// Bytes appended to the target.
    pub bytes_appended: u64,

    /// Fragments consumed and deleted, in append order.
    pub removed: Vec<PathBuf>,

    /// Duration of the merge.
    pub duration: Duration,
}

/// Report of an unpack pass over a folder of downloaded archives.
#[derive(Debug, Clone, Default)]
pub struct UnpackReport {
    /// Archives that were extracted.
    pub archives: Vec<PathBuf>,

    /// Files written across all archives.
    pub files_extracted: usize,

    /// Entries skipped across all archives.
    pub entries_skipped: usize,

    /// Bytes written across all archives.
    pub bytes_written: u64,

    /// Stale files removed before their archive was extracted.
    pub stale_removed: Vec<PathBuf>,

    /// Warnings collected from every extraction.
    pub warnings: Vec<String>,
}

impl UnpackReport {
    /// Folds one archive's extraction report into the totals.
    pub fn absorb(&mut self, archive: PathBuf, report: ExtractionReport) {
        self.archives.push(archive);
        self.files_extracted += report.files_extracted;
        self.entries_skipped += report.entries_skipped;
        self.bytes_written = self.bytes_written.saturating_add(report.bytes_written);
        self.warnings.extend(report.warnings);
    }
}

/// Callback trait for progress reporting during downloads and unpacking.
///
/// # Examples
///
/// ```
/// use logpull_core::ProgressCallback;
/// use std::path::Path;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("Processing {}/{}: {}", current, total, path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, path: &Path) {
///         println!("Completed: {}", path.display());
///     }
///
///     fn on_complete(&mut self) {}
/// }
/// ```
pub trait ProgressCallback {
    /// Called when starting to process an item.
    ///
    /// `current` is 1-indexed.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called when bytes are written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an item has been completely processed.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when the whole operation is complete.
    fn on_complete(&mut self);
}

/// `ProgressCallback` that ignores every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
