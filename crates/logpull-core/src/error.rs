//! Error types for extraction, merge and fetch operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `LogpullError`.
pub type Result<T> = std::result::Result<T, LogpullError>;

/// Errors that can occur while extracting, merging or fetching logs.
#[derive(Error, Debug)]
pub enum LogpullError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not a well-formed zip container.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Merge found no file matching the fragment pattern.
    #[error("no files matching {pattern} under {folder}")]
    NoMatchingFiles {
        /// Folder that was scanned.
        folder: PathBuf,
        /// Pattern the file names were matched against.
        pattern: String,
    },

    /// A date-time string is not a valid `YYYYMMDDHHMMSS` timestamp.
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A fragment pattern does not compile or has no key capture group.
    #[error("invalid fragment pattern: {0}")]
    InvalidPattern(String),

    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl LogpullError {
    /// Returns `true` if the error was caused by the caller's input rather
    /// than by the environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use logpull_core::LogpullError;
    ///
    /// let err = LogpullError::InvalidArchive("not a zip".to_string());
    /// assert!(err.is_input_error());
    ///
    /// let err = LogpullError::Http("connection refused".to_string());
    /// assert!(!err.is_input_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArchive(_)
                | Self::NoMatchingFiles { .. }
                | Self::InvalidTimestamp { .. }
                | Self::InvalidPattern(_)
        )
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use logpull_core::LogpullError;
    ///
    /// let err = LogpullError::InvalidArchive("bad header".to_string());
    /// assert_eq!(err.context(), Some("bad header"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) | Self::InvalidPattern(msg) | Self::Http(msg) => Some(msg),
            Self::InvalidTimestamp { reason, .. } => Some(reason),
            Self::Io(_) | Self::NoMatchingFiles { .. } => None,
        }
    }
}

impl From<reqwest::Error> for LogpullError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<walkdir::Error> for LogpullError {
    fn from(err: walkdir::Error) -> Self {
        let message = format!("walkdir error: {err}");
        match err.into_io_error() {
            Some(io_err) => Self::Io(std::io::Error::new(io_err.kind(), message)),
            None => Self::Io(std::io::Error::other(message)),
        }
    }
}
