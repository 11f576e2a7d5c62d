//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::commands::fetch::FetchSummary;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use logpull_core::ExtractionReport;
use logpull_core::MergeReport;
use logpull_core::Timestamp;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn heading(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }

    fn warnings(&self, warnings: &[String]) {
        if warnings.is_empty() {
            return;
        }

        let _ = self.term.write_line("");
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{}", style("Warnings:").yellow().bold()));
        } else {
            let _ = self.term.write_line("Warnings:");
        }
        for warning in warnings {
            let _ = self.term.write_line(&format!("  - {warning}"));
        }
    }

    fn merge_lines(&self, report: &MergeReport) {
        let _ = self
            .term
            .write_line(&format!("  Merged log: {}", report.target.display()));
        let _ = self
            .term
            .write_line(&format!("  Fragments:  {}", report.fragments_merged));
        let _ = self.term.write_line(&format!(
            "  Appended:   {}",
            humanize_bytes(report.bytes_appended)
        ));

        if self.verbose {
            for removed in &report.removed {
                let _ = self
                    .term
                    .write_line(&format!("  Removed:    {}", removed.display()));
            }
            let _ = self
                .term
                .write_line(&format!("  Duration:   {:?}", report.duration));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, archive: &Path, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.heading("Extraction complete");
        let _ = self
            .term
            .write_line(&format!("  Files extracted: {}", report.files_extracted));
        let _ = self
            .term
            .write_line(&format!("  Directories: {}", report.directories_created));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            humanize_bytes(report.bytes_written)
        ));

        if report.entries_skipped > 0 {
            let _ = self
                .term
                .write_line(&format!("  Entries skipped: {}", report.entries_skipped));
        }
        if report.source_deleted {
            let _ = self
                .term
                .write_line(&format!("  Removed archive: {}", archive.display()));
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Destination: {}", report.destination.display()));
            let _ = self.term.write_line(&format!(
                "  Permissions applied: {}",
                report.permissions_applied
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        self.warnings(&report.warnings);
        Ok(())
    }

    fn format_merge_result(&self, report: &MergeReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.heading("Merge complete");
        self.merge_lines(report);
        Ok(())
    }

    fn format_fetch_result(&self, summary: &FetchSummary) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.heading(&format!(
            "Fetched logs for device {} since {}",
            summary.device, summary.since
        ));
        let _ = self
            .term
            .write_line(&format!("  Downloaded: {}/{}", summary.downloaded.len(), summary.listed));
        let _ = self.term.write_line(&format!(
            "  Unpacked:   {} archives, {} files",
            summary.unpack.archives.len(),
            summary.unpack.files_extracted
        ));
        self.merge_lines(&summary.merge);
        self.warnings(&summary.unpack.warnings);

        Ok(())
    }

    fn format_timestamp(&self, timestamp: &Timestamp) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.heading(&format!(
            "{timestamp} is a valid timestamp ({})",
            timestamp.as_datetime()
        ));
        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
