//! Removal of a consumed source archive.

use std::path::Path;

use log::debug;
use log::warn;

/// Removes the source archive when dropped, if armed.
///
/// The guard runs on every exit from an extraction that got past container
/// validation: normal return, early `?` return, or unwinding. Removal
/// failures are logged and never replace the extraction result.
#[derive(Debug)]
pub struct SourceCleanup<'a> {
    path: &'a Path,
    armed: bool,
}

impl<'a> SourceCleanup<'a> {
    /// Creates a guard for `path`. Nothing is removed unless `armed`.
    #[must_use]
    pub fn new(path: &'a Path, armed: bool) -> Self {
        Self { path, armed }
    }

    /// Removes the archive now and disarms the guard.
    ///
    /// Returns `true` if the archive was removed.
    pub fn finish(mut self) -> bool {
        let removed = self.armed && remove_source(self.path);
        self.armed = false;
        removed
    }
}

impl Drop for SourceCleanup<'_> {
    fn drop(&mut self) {
        if self.armed {
            remove_source(self.path);
        }
    }
}

fn remove_source(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!("removed source archive {}", path.display());
            true
        }
        Err(e) => {
            warn!("failed to remove source archive {}: {e}", path.display());
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_disarmed_guard_keeps_file() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let archive = temp.path().join("a.zip");
        fs::write(&archive, "zip").unwrap();

        drop(SourceCleanup::new(&archive, false));
        assert!(archive.exists());

        assert!(!SourceCleanup::new(&archive, false).finish());
        assert!(archive.exists());
    }

    #[test]
    fn test_armed_guard_removes_on_drop() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let archive = temp.path().join("a.zip");
        fs::write(&archive, "zip").unwrap();

        {
            let _cleanup = SourceCleanup::new(&archive, true);
        }
        assert!(!archive.exists());
    }

    #[test]
    fn test_finish_reports_removal() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let archive = temp.path().join("a.zip");
        fs::write(&archive, "zip").unwrap();

        assert!(SourceCleanup::new(&archive, true).finish());
        assert!(!archive.exists());
    }

    #[test]
    fn test_missing_source_is_not_fatal() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let archive = temp.path().join("gone.zip");

        assert!(!SourceCleanup::new(&archive, true).finish());
    }
}
