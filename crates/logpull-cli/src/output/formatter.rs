//! Output formatter trait for CLI results.

use crate::commands::fetch::FetchSummary;
use anyhow::Result;
use logpull_core::ExtractionReport;
use logpull_core::MergeReport;
use logpull_core::Timestamp;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format extraction result
    fn format_extraction_result(&self, archive: &Path, report: &ExtractionReport) -> Result<()>;

    /// Format merge result
    fn format_merge_result(&self, report: &MergeReport) -> Result<()>;

    /// Format the outcome of a full fetch run
    fn format_fetch_result(&self, summary: &FetchSummary) -> Result<()>;

    /// Format a validated timestamp
    fn format_timestamp(&self, timestamp: &Timestamp) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data,
        }
    }

    pub fn warning(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Warning,
            data,
        }
    }
}
