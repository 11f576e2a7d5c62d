//! Fetch, unpack and merge timestamped logcat dumps.
//!
//! `logpull-core` provides the building blocks behind the `logpull` CLI:
//! zip extraction with path normalization and permission restore, merging
//! of `logcat.dump.<YYYYMMDDHHMMSS>.log` fragments in timestamp order, and a
//! blocking client for the log server's directory listing.
//!
//! # Examples
//!
//! ```no_run
//! use logpull_core::ExtractConfig;
//! use logpull_core::NoopProgress;
//! use logpull_core::merge::merge_logcat;
//! use logpull_core::pipeline::unpack_all;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractConfig::default().with_delete_source(true);
//! unpack_all("logs", &config, &mut NoopProgress)?;
//! let report = merge_logcat("logs")?;
//! println!("merged log: {}", report.target.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod merge;
pub mod pipeline;
pub mod remote;
pub mod report;
pub mod timestamp;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

pub use api::extract;
pub use config::ExtractConfig;
pub use config::RemoteConfig;
pub use error::LogpullError;
pub use error::Result;
pub use extraction::extract_zip;
pub use report::ExtractionReport;
pub use report::MergeReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::UnpackReport;
pub use timestamp::Timestamp;

pub use types::DestDir;
pub use types::SafePath;
