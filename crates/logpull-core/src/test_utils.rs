//! Test utilities for building zip archives and log fragments.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use zip::write::SimpleFileOptions;

/// Creates an in-memory ZIP archive from `(path, content)` pairs.
///
/// Files are stored uncompressed with mode 0o644.
///
/// # Examples
///
/// ```
/// use logpull_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(vec![
///     ("file.txt", b"hello".as_slice()),
///     ("dir/nested.txt", b"world".as_slice()),
/// ]);
/// assert!(!zip_data.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Writes a fragment file named `logcat.dump.<timestamp>.log` into `dir`.
///
/// # Examples
///
/// ```
/// use logpull_core::test_utils::write_fragment;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// let path = write_fragment(temp.path(), "20160101000001", b"A");
/// assert!(path.ends_with("logcat.dump.20160101000001.log"));
/// ```
pub fn write_fragment(dir: &Path, timestamp: &str, content: &[u8]) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(format!("logcat.dump.{timestamp}.log"));
    std::fs::write(&path, content).unwrap();
    path
}

/// Builder for ZIP test archives with files and directories.
///
/// Entry names are stored verbatim, so hostile names such as `../evil`
/// can be produced.
///
/// # Examples
///
/// ```
/// use logpull_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_file("file.txt", b"content")
///     .add_directory("dir/")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a regular file with mode 0o644.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a regular file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(mode);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a deflate-compressed regular file with mode 0o644.
    #[must_use]
    pub fn add_deflated_file(mut self, path: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory with mode 0o755.
    #[must_use]
    pub fn add_directory(self, path: &str) -> Self {
        self.add_directory_with_mode(path, 0o755)
    }

    /// Adds a directory with a custom mode.
    #[must_use]
    pub fn add_directory_with_mode(mut self, path: &str, mode: u32) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(mode);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    /// Builds the archive and writes it to `path`.
    pub fn write_to(self, path: &Path) -> PathBuf {
        std::fs::write(path, self.build()).unwrap();
        path.to_path_buf()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a ZIP archive of empty files that looks created on MS-DOS.
///
/// Each `(name, attributes)` pair becomes a stored entry whose central
/// directory header records host system 0 and the given raw external
/// attributes, so no POSIX mode is present unless the upper 16 bits are set.
///
/// # Examples
///
/// ```
/// use logpull_core::test_utils::dos_zip;
///
/// let zip_data = dos_zip(&[("readme.txt", 0x01)]);
/// assert!(!zip_data.is_empty());
/// ```
#[must_use]
pub fn dos_zip(entries: &[(&str, u32)]) -> Vec<u8> {
    const VERSION: u16 = 20;
    // 1980-01-01, the earliest DOS date
    const DOS_DATE: u16 = 0x0021;

    let mut local = Vec::new();
    let mut central = Vec::new();

    for (name, attributes) in entries {
        let name_len = u16::try_from(name.len()).unwrap();
        let offset = u32::try_from(local.len()).unwrap();

        local.extend_from_slice(&0x0403_4b50_u32.to_le_bytes());
        local.extend_from_slice(&VERSION.to_le_bytes());
        // flags, method, time
        local.extend_from_slice(&[0; 6]);
        local.extend_from_slice(&DOS_DATE.to_le_bytes());
        // crc, compressed and uncompressed sizes
        local.extend_from_slice(&[0; 12]);
        local.extend_from_slice(&name_len.to_le_bytes());
        local.extend_from_slice(&0_u16.to_le_bytes());
        local.extend_from_slice(name.as_bytes());

        central.extend_from_slice(&0x0201_4b50_u32.to_le_bytes());
        // version made by: upper byte 0 is MS-DOS
        central.extend_from_slice(&VERSION.to_le_bytes());
        central.extend_from_slice(&VERSION.to_le_bytes());
        central.extend_from_slice(&[0; 6]);
        central.extend_from_slice(&DOS_DATE.to_le_bytes());
        central.extend_from_slice(&[0; 12]);
        central.extend_from_slice(&name_len.to_le_bytes());
        // extra length, comment length, disk number, internal attributes
        central.extend_from_slice(&[0; 8]);
        central.extend_from_slice(&attributes.to_le_bytes());
        central.extend_from_slice(&offset.to_le_bytes());
        central.extend_from_slice(name.as_bytes());
    }

    let count = u16::try_from(entries.len()).unwrap();
    let central_size = u32::try_from(central.len()).unwrap();
    let central_offset = u32::try_from(local.len()).unwrap();

    let mut data = local;
    data.extend_from_slice(&central);
    data.extend_from_slice(&0x0605_4b50_u32.to_le_bytes());
    // disk numbers
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&count.to_le_bytes());
    data.extend_from_slice(&count.to_le_bytes());
    data.extend_from_slice(&central_size.to_le_bytes());
    data.extend_from_slice(&central_offset.to_le_bytes());
    data.extend_from_slice(&0_u16.to_le_bytes());
    data
}
