//! Buffered copy shared by extraction and merging.
//!
//! Both the zip extractor and the fragment merger stream whole files from a
//! reader into a writer. A single [`CopyBuffer`] is allocated per operation
//! and reused for every entry or fragment.

use std::io;
use std::io::Read;
use std::io::Write;

use crate::Result;

/// Buffer size for streaming copies (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable copy buffer.
///
/// # Examples
///
/// ```
/// use logpull_core::copy::{CopyBuffer, copy_with_buffer};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut buffer = CopyBuffer::new();
/// let mut input: &[u8] = b"01-01 00:00:01.000  D/tag: hello\n";
/// let mut output = Vec::new();
///
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// assert_eq!(copied, output.len() as u64);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies everything from `reader` into `writer` through `buffer`.
///
/// Returns the number of bytes copied. Interrupted reads are retried.
///
/// # Errors
///
/// Returns an error if reading or writing fails, or if the byte count would
/// overflow `u64`.
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;

        total = total
            .checked_add(bytes_read as u64)
            .ok_or_else(|| io::Error::other("byte count overflow during copy"))?;
    }

    Ok(total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_buffer_size() {
        assert_eq!(CopyBuffer::new().size(), 64 * 1024);
        assert_eq!(CopyBuffer::default().size(), 64 * 1024);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut buffer = CopyBuffer::new();
        let mut input = Cursor::new(Vec::<u8>::new());
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap();
        assert_eq!(copied, 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_spans_multiple_buffers() {
        let mut buffer = CopyBuffer::new();
        let input_data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let mut input = Cursor::new(&input_data);
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap();
        assert_eq!(copied, input_data.len() as u64);
        assert_eq!(output, input_data);
    }

    #[test]
    fn test_copy_retries_interrupted_reads() {
        struct Flaky {
            interrupted: bool,
            data: Cursor<Vec<u8>>,
        }

        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
                }
                self.data.read(buf)
            }
        }

        let mut reader = Flaky {
            interrupted: false,
            data: Cursor::new(b"ABC".to_vec()),
        };
        let mut output = Vec::new();
        let copied = copy_with_buffer(&mut reader, &mut output, &mut CopyBuffer::new()).unwrap();
        assert_eq!(copied, 3);
        assert_eq!(output, b"ABC");
    }

    #[test]
    fn test_copy_propagates_write_error() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut input = Cursor::new(b"data".to_vec());
        let result = copy_with_buffer(&mut input, &mut Broken, &mut CopyBuffer::new());
        assert!(matches!(result, Err(crate::LogpullError::Io(_))));
    }
}
