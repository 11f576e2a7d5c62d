//! Filesystem helpers used while materializing archive entries.

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// Permission bits kept from a stored mode (file type bits are dropped).
const PERMISSION_MASK: u32 = 0o7777;

/// Writes `reader` to `output_path`, replacing any existing file.
///
/// Parent directories are created first. Returns the number of bytes
/// written.
pub fn write_file<R: Read + ?Sized>(
    reader: &mut R,
    output_path: &Path,
    copy_buffer: &mut CopyBuffer,
) -> Result<u64> {
    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }

    // File::create truncates, so a second extraction fully replaces the first
    let output_file = File::create(output_path)?;
    let mut writer = BufWriter::with_capacity(64 * 1024, output_file);
    let bytes_written = copy_with_buffer(reader, &mut writer, copy_buffer)?;
    writer.flush()?;

    Ok(bytes_written)
}

/// Creates a directory and its parents; an existing directory is not an error.
pub fn create_directory(dir_path: &Path) -> Result<()> {
    create_dir_all(dir_path)?;
    Ok(())
}

/// Applies the permission bits of a stored POSIX mode.
///
/// Returns `false` without touching the file when the mode carries no
/// permission bits, or on platforms without POSIX permissions.
pub fn apply_permissions(path: &Path, mode: u32) -> Result<bool> {
    let permissions = mode & PERMISSION_MASK;
    if permissions == 0 {
        return Ok(false);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(permissions))?;
        Ok(true)
    }

    #[cfg(not(unix))]
    {
        let _ = path;
        Ok(false)
    }
}
