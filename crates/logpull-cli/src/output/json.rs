//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use crate::commands::fetch::FetchSummary;
use anyhow::Result;
use logpull_core::ExtractionReport;
use logpull_core::MergeReport;
use logpull_core::Timestamp;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct ExtractionOutput {
    archive: String,
    destination: String,
    files_extracted: usize,
    directories_created: usize,
    entries_skipped: usize,
    permissions_applied: usize,
    bytes_written: u64,
    source_deleted: bool,
    duration_ms: u128,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct MergeOutput {
    target: String,
    fragments_merged: usize,
    bytes_appended: u64,
    removed: Vec<String>,
    duration_ms: u128,
}

impl MergeOutput {
    fn from_report(report: &MergeReport) -> Self {
        Self {
            target: report.target.display().to_string(),
            fragments_merged: report.fragments_merged,
            bytes_appended: report.bytes_appended,
            removed: report
                .removed
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, archive: &Path, report: &ExtractionReport) -> Result<()> {
        let data = ExtractionOutput {
            archive: archive.display().to_string(),
            destination: report.destination.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            entries_skipped: report.entries_skipped,
            permissions_applied: report.permissions_applied,
            bytes_written: report.bytes_written,
            source_deleted: report.source_deleted,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_merge_result(&self, report: &MergeReport) -> Result<()> {
        Self::output(&JsonOutput::success(
            "merge",
            MergeOutput::from_report(report),
        ))
    }

    fn format_fetch_result(&self, summary: &FetchSummary) -> Result<()> {
        #[derive(Serialize)]
        struct FetchOutput {
            device: String,
            since: String,
            listed: usize,
            downloaded: Vec<String>,
            archives_unpacked: usize,
            files_extracted: usize,
            entries_skipped: usize,
            merge: MergeOutput,
            warnings: Vec<String>,
        }

        let data = FetchOutput {
            device: summary.device.clone(),
            since: summary.since.to_string(),
            listed: summary.listed,
            downloaded: summary
                .downloaded
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            archives_unpacked: summary.unpack.archives.len(),
            files_extracted: summary.unpack.files_extracted,
            entries_skipped: summary.unpack.entries_skipped,
            merge: MergeOutput::from_report(&summary.merge),
            warnings: summary.unpack.warnings.clone(),
        };

        Self::output(&JsonOutput::success("fetch", data))
    }

    fn format_timestamp(&self, timestamp: &Timestamp) -> Result<()> {
        #[derive(Serialize)]
        struct TimestampOutput {
            timestamp: String,
            datetime: String,
        }

        let data = TimestampOutput {
            timestamp: timestamp.to_string(),
            datetime: timestamp.as_datetime().to_string(),
        };

        Self::output(&JsonOutput::success("check-date", data))
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::warning(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
