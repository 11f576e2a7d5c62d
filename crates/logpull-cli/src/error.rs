//! Error conversion utilities for CLI.
//!
//! Converts logpull-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use logpull_core::LogpullError;
use std::fmt::Display;

/// Converts `LogpullError` to a user-friendly anyhow error mentioning `subject`
/// (the archive, folder or URL being processed).
pub fn convert_error(err: LogpullError, subject: &impl Display) -> anyhow::Error {
    match err {
        LogpullError::Io(io_err) => {
            anyhow!("I/O error while processing '{subject}': {io_err}")
        }
        LogpullError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{subject}': {reason}\n\
                 HINT: The file may be truncated or not a zip; download it again."
            )
        }
        LogpullError::NoMatchingFiles { folder, pattern } => {
            anyhow!(
                "No log fragments matching {pattern} under '{}'\n\
                 HINT: No log was fetched for this date; try an earlier -d value.",
                folder.display()
            )
        }
        LogpullError::InvalidTimestamp { value, reason } => {
            anyhow!(
                "Invalid date '{value}': {reason}\n\
                 HINT: Use 14 digits accurate to seconds, like 20160101053000."
            )
        }
        LogpullError::InvalidPattern(reason) => {
            anyhow!("Invalid fragment pattern: {reason}")
        }
        LogpullError::Http(reason) => {
            anyhow!(
                "Request to the log server failed for '{subject}': {reason}\n\
                 HINT: Check --base-url (or LOGPULL_BASE_URL) and the network connection."
            )
        }
    }
}

/// Adds context to a core result.
pub fn add_context<T>(
    result: Result<T, LogpullError>,
    subject: &impl Display,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_error(e, subject))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;
    use std::path::PathBuf;

    #[test]
    fn test_convert_invalid_archive() {
        let err = LogpullError::InvalidArchive("bad header".into());
        let msg = format!("{:?}", convert_error(err, &Path::new("a.zip").display()));
        assert!(msg.contains("a.zip"));
        assert!(msg.contains("bad header"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_no_matching_files() {
        let err = LogpullError::NoMatchingFiles {
            folder: PathBuf::from("logs"),
            pattern: "^x(\\d+)$".into(),
        };
        let msg = format!("{:?}", convert_error(err, &"logs"));
        assert!(msg.contains("No log fragments"));
        assert!(msg.contains("earlier -d"));
    }

    #[test]
    fn test_convert_invalid_timestamp() {
        let err = LogpullError::InvalidTimestamp {
            value: "2016".into(),
            reason: "expected 14 digits, got 4".into(),
        };
        let msg = format!("{:?}", convert_error(err, &"2016"));
        assert!(msg.contains("Invalid date '2016'"));
        assert!(msg.contains("20160101053000"));
    }

    #[test]
    fn test_convert_http_error() {
        let err = LogpullError::Http("GET http://h/logs/1 returned 404 Not Found".into());
        let msg = format!("{:?}", convert_error(err, &"http://h/logs/1"));
        assert!(msg.contains("LOGPULL_BASE_URL"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let msg = format!("{:?}", convert_error(LogpullError::Io(io_err), &"a.zip"));
        assert!(msg.contains("I/O error"));
    }
}
