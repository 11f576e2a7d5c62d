//! Ordered concatenation of timestamped fragments.

use std::cmp::Ordering;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use log::debug;
use log::info;
use walkdir::WalkDir;

use super::pattern::FragmentPattern;
use crate::LogpullError;
use crate::MergeReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// A matched fragment on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fragment {
    path: PathBuf,
    name: String,
    key: Option<u64>,
}

impl Fragment {
    /// Ascending key, keyless names last, then file name, then full path.
    fn merge_order(&self, other: &Self) -> Ordering {
        let rank = |f: &Self| (f.key.is_none(), f.key);
        rank(self)
            .cmp(&rank(other))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.path.cmp(&other.path))
    }
}

/// Merges every fragment under `folder` into the one with the smallest key.
///
/// `folder` is scanned recursively; a regular file takes part when its file
/// name matches `pattern`. Fragments are ordered by `key` (ascending), with
/// ties broken by file name and then by full path. The first fragment is
/// opened for appending and receives the content of every later fragment, in
/// order, with no separators. Each consumed fragment is deleted right after
/// its bytes are flushed into the target.
///
/// A single matching fragment is returned untouched. The target handle is
/// closed on every exit path; there is no rollback if an append fails
/// halfway.
///
/// The folder is assumed to have a single writer for the duration of the
/// call; no locking is performed.
///
/// # Errors
///
/// Returns an error if:
/// - no file matches (`NoMatchingFiles`, nothing is opened or deleted)
/// - the folder cannot be walked, or a fragment cannot be read, appended or
///   deleted (`Io`)
///
/// # Examples
///
/// ```no_run
/// use logpull_core::merge::FragmentPattern;
/// use logpull_core::merge::merge_fragments;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pattern = FragmentPattern::new(r"^part-(\d+)\.txt$")?;
/// let report = merge_fragments("parts", &pattern, |name| pattern.key(name))?;
/// println!("merged into {}", report.target.display());
/// # Ok(())
/// # }
/// ```
pub fn merge_fragments<P, F>(folder: P, pattern: &FragmentPattern, key: F) -> Result<MergeReport>
where
    P: AsRef<Path>,
    F: Fn(&str) -> Option<u64>,
{
    let start = Instant::now();
    let folder = folder.as_ref();

    let mut fragments = find_fragments(folder, pattern, &key)?;
    fragments.sort_by(Fragment::merge_order);

    let mut ordered = fragments.into_iter();
    let Some(target) = ordered.next() else {
        return Err(LogpullError::NoMatchingFiles {
            folder: folder.to_path_buf(),
            pattern: pattern.to_string(),
        });
    };
    let rest: Vec<Fragment> = ordered.collect();

    let mut report = MergeReport {
        target: target.path,
        fragments_merged: rest.len() + 1,
        ..MergeReport::default()
    };

    if rest.is_empty() {
        debug!("single fragment {}, nothing to merge", report.target.display());
        report.duration = start.elapsed();
        return Ok(report);
    }

    info!(
        "merging {} fragments into {}",
        report.fragments_merged,
        report.target.display()
    );

    let (bytes_appended, removed) = append_fragments(&report.target, &rest)?;
    report.bytes_appended = bytes_appended;
    report.removed = removed;
    report.duration = start.elapsed();

    Ok(report)
}

/// Merges logcat dump fragments (`logcat.dump.<YYYYMMDDHHMMSS>.log`).
///
/// # Errors
///
/// See [`merge_fragments`].
pub fn merge_logcat<P: AsRef<Path>>(folder: P) -> Result<MergeReport> {
    let pattern = FragmentPattern::logcat();
    merge_fragments(folder, pattern, |name| pattern.key(name))
}

/// Appends `rest` to `target` in order, deleting each fragment once copied.
///
/// Returns the bytes appended and the removed paths.
fn append_fragments(target: &Path, rest: &[Fragment]) -> Result<(u64, Vec<PathBuf>)> {
    let output = OpenOptions::new().append(true).open(target)?;
    // Dropped on every return below, which closes the target
    let mut writer = BufWriter::new(output);
    let mut copy_buffer = CopyBuffer::new();
    let mut bytes_appended: u64 = 0;
    let mut removed = Vec::with_capacity(rest.len());

    for fragment in rest {
        debug!("appending {}", fragment.path.display());
        let copied = {
            let mut input = File::open(&fragment.path)?;
            copy_with_buffer(&mut input, &mut writer, &mut copy_buffer)?
        };
        writer.flush()?;
        std::fs::remove_file(&fragment.path)?;

        bytes_appended = bytes_appended.saturating_add(copied);
        removed.push(fragment.path.clone());
    }

    writer.flush()?;
    Ok((bytes_appended, removed))
}

fn find_fragments<F>(folder: &Path, pattern: &FragmentPattern, key: &F) -> Result<Vec<Fragment>>
where
    F: Fn(&str) -> Option<u64>,
{
    let mut fragments = Vec::new();

    for entry in WalkDir::new(folder) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };

        if pattern.is_match(name) {
            fragments.push(Fragment {
                key: key(name),
                name: name.to_owned(),
                path: entry.into_path(),
            });
        }
    }

    Ok(fragments)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::write_fragment;
    use std::fs;
    use tempfile::TempDir;

    fn fragment(name: &str, key: Option<u64>, path: &str) -> Fragment {
        Fragment {
            path: PathBuf::from(path),
            name: name.to_owned(),
            key,
        }
    }

    #[test]
    fn test_merge_order_by_numeric_key() {
        let mut fragments = vec![
            fragment("b", Some(100), "x/b"),
            fragment("a", Some(9), "x/a"),
            fragment("c", None, "x/c"),
            fragment("d", Some(10), "x/d"),
        ];
        fragments.sort_by(Fragment::merge_order);

        let names: Vec<&str> = fragments.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a", "d", "b", "c"]);
    }

    #[test]
    fn test_merge_order_ties_by_name_then_path() {
        let mut fragments = vec![
            fragment("z", Some(1), "b/z"),
            fragment("y", Some(1), "b/y"),
            fragment("y", Some(1), "a/y"),
        ];
        fragments.sort_by(Fragment::merge_order);

        let paths: Vec<&Path> = fragments.iter().map(|f| f.path.as_path()).collect();
        assert_eq!(
            paths,
            [Path::new("a/y"), Path::new("b/y"), Path::new("b/z")]
        );
    }

    #[test]
    fn test_merge_three_fragments() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let first = write_fragment(temp.path(), "20160101000001", b"A");
        let third = write_fragment(temp.path(), "20160101000003", b"C");
        let second = write_fragment(temp.path(), "20160101000002", b"B");

        let report = merge_logcat(temp.path()).unwrap();

        assert_eq!(report.target, first);
        assert_eq!(report.fragments_merged, 3);
        assert_eq!(report.bytes_appended, 2);
        assert_eq!(report.removed, vec![second.clone(), third.clone()]);
        assert_eq!(fs::read_to_string(&first).unwrap(), "ABC");
        assert!(!second.exists());
        assert!(!third.exists());
    }

    #[test]
    fn test_single_fragment_untouched() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let only = write_fragment(temp.path(), "20160101000001", b"Z");

        let report = merge_logcat(temp.path()).unwrap();

        assert_eq!(report.target, only);
        assert_eq!(report.fragments_merged, 1);
        assert!(report.removed.is_empty());
        assert_eq!(fs::read_to_string(&only).unwrap(), "Z");
    }

    #[test]
    fn test_no_fragments() {
        let temp = TempDir::new().expect("failed to create temp dir");
        fs::write(temp.path().join("readme.txt"), "not a fragment").unwrap();

        let result = merge_logcat(temp.path());

        assert!(matches!(result, Err(LogpullError::NoMatchingFiles { .. })));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_folder_is_io_error() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let result = merge_logcat(temp.path().join("missing"));
        assert!(matches!(result, Err(LogpullError::Io(_))));
    }

    #[test]
    fn test_non_matching_files_untouched() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let first = write_fragment(temp.path(), "20160101000001", b"1");
        write_fragment(temp.path(), "20160101000002", b"2");
        let zip = temp.path().join("logcat.dump.20160101000003.log.zip");
        fs::write(&zip, "zip").unwrap();

        merge_logcat(temp.path()).unwrap();

        assert_eq!(fs::read_to_string(first).unwrap(), "12");
        assert!(zip.exists());
    }

    #[test]
    fn test_directory_named_like_fragment_ignored() {
        let temp = TempDir::new().expect("failed to create temp dir");
        fs::create_dir(temp.path().join("logcat.dump.20150101000000.log")).unwrap();
        let only = write_fragment(temp.path(), "20160101000001", b"x");

        let report = merge_logcat(temp.path()).unwrap();
        assert_eq!(report.target, only);
    }

    #[test]
    fn test_fragments_in_subdirectories() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let nested = write_fragment(&temp.path().join("a/b"), "20160101000001", b"first ");
        let top = write_fragment(temp.path(), "20160101000002", b"second");

        let report = merge_logcat(temp.path()).unwrap();

        assert_eq!(report.target, nested);
        assert_eq!(fs::read_to_string(&nested).unwrap(), "first second");
        assert!(!top.exists());
    }

    #[test]
    fn test_custom_pattern_and_key() {
        let temp = TempDir::new().expect("failed to create temp dir");
        for (n, body) in [(10, "ten"), (9, "nine"), (100, "hundred")] {
            fs::write(temp.path().join(format!("part-{n}.txt")), body).unwrap();
        }
        let pattern = FragmentPattern::new(r"^part-(\d+)\.txt$").unwrap();

        // Reverse ordering through the injected key
        let report =
            merge_fragments(temp.path(), &pattern, |name| pattern.key(name).map(|k| 1000 - k))
                .unwrap();

        assert_eq!(report.target, temp.path().join("part-100.txt"));
        assert_eq!(fs::read_to_string(&report.target).unwrap(), "hundredtennine");
    }

    #[test]
    fn test_binary_content_preserved() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let first_bytes: Vec<u8> = (0..=255).collect();
        let second_bytes: Vec<u8> = vec![0, 0, 0xff, b'\n', b'\r'];
        let first = write_fragment(temp.path(), "20160101000001", &first_bytes);
        write_fragment(temp.path(), "20160101000002", &second_bytes);

        merge_logcat(temp.path()).unwrap();

        let merged = fs::read(first).unwrap();
        assert_eq!(merged, [first_bytes, second_bytes].concat());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_fragment_stops_merge() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("failed to create temp dir");
        let first = write_fragment(temp.path(), "20160101000001", b"A");
        let second = write_fragment(temp.path(), "20160101000002", b"B");
        fs::set_permissions(&second, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file permissions
        if File::open(&second).is_ok() {
            return;
        }

        let result = merge_logcat(temp.path());

        fs::set_permissions(&second, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(matches!(result, Err(LogpullError::Io(_))));
        assert_eq!(fs::read_to_string(first).unwrap(), "A");
        assert!(second.exists());
    }
}
