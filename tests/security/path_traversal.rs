//! Zip-slip integration tests.
//!
//! Archives with hostile entry names must never write outside the
//! destination; offending entries are skipped and reported.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use logpull_core::ExtractConfig;
use logpull_core::extract_zip;
use logpull_core::test_utils::ZipTestBuilder;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_classic_zip_slip_entries_skipped() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("dest");
    let archive = ZipTestBuilder::new()
        .add_file("../evil.txt", b"owned")
        .add_file("../../etc/passwd", b"owned")
        .add_file("foo/../../escape.txt", b"owned")
        .add_file("ok.txt", b"fine")
        .write_to(&temp.path().join("slip.zip"));

    let report = extract_zip(&archive, &dest, &ExtractConfig::default()).unwrap();

    assert_eq!(report.files_extracted, 1);
    assert_eq!(report.entries_skipped, 3);
    assert_eq!(report.warnings.len(), 3);
    assert!(report.warnings.iter().all(|w| w.starts_with("skipped ")));
    assert!(!temp.path().join("evil.txt").exists());
    assert!(!temp.path().join("escape.txt").exists());
    assert_eq!(fs::read_to_string(dest.join("ok.txt")).unwrap(), "fine");
}

#[test]
fn test_backslash_traversal_skipped() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("dest");
    let archive = ZipTestBuilder::new()
        .add_file("..\\evil.txt", b"owned")
        .add_file("dir\\..\\..\\evil2.txt", b"owned")
        .write_to(&temp.path().join("slip.zip"));

    let report = extract_zip(&archive, &dest, &ExtractConfig::default()).unwrap();

    assert_eq!(report.entries_skipped, 2);
    assert!(!temp.path().join("evil.txt").exists());
    assert!(!temp.path().join("evil2.txt").exists());
}

#[test]
fn test_absolute_and_drive_entries_rebased() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("dest");
    let archive = ZipTestBuilder::new()
        .add_file("/tmp/abs.txt", b"abs")
        .add_file("C:\\windows\\drive.txt", b"drive")
        .write_to(&temp.path().join("abs.zip"));

    let report = extract_zip(&archive, &dest, &ExtractConfig::default()).unwrap();

    assert_eq!(report.files_extracted, 2);
    assert!(dest.join("tmp/abs.txt").is_file());
    assert!(dest.join("windows/drive.txt").is_file());
}

#[test]
fn test_traversal_does_not_stop_extraction() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("dest");
    let archive = ZipTestBuilder::new()
        .add_file("a.txt", b"a")
        .add_file("../b.txt", b"b")
        .add_file("c.txt", b"c")
        .write_to(&temp.path().join("mixed.zip"));

    let config = ExtractConfig::default().with_delete_source(true);
    let report = extract_zip(&archive, &dest, &config).unwrap();

    assert_eq!(report.files_extracted, 2);
    assert!(report.source_deleted);
    assert!(dest.join("a.txt").is_file());
    assert!(dest.join("c.txt").is_file());
}
