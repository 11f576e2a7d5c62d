//! Zip extraction with path normalization and permission restore.

pub mod cleanup;
pub mod common;
pub mod zip;

pub use cleanup::SourceCleanup;
pub use self::zip::extract_zip;
