//! Progress bar implementation for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use logpull_core::NoopProgress;
use logpull_core::ProgressCallback;
use std::path::Path;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Counts completed items against the total announced by the first
/// `on_entry_start` and shows the bytes written so far. Cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a progress bar labelled with `message` (e.g. "Downloading").
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Downloading [████████░░░░] 3/7 files (1.2 MB, 4s)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} files ({prefix}, {elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        bar.set_message(message.to_string());
        bar.set_prefix(humanize_bytes(0));

        Self {
            bar,
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, path: &Path, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
        log::debug!("processing {}", path.display());
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written = self.bytes_written.saturating_add(bytes);
        self.bar.set_prefix(humanize_bytes(self.bytes_written));
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Runs `operation` with a progress bar when enabled and attached to a TTY.
pub fn with_progress<T>(
    enabled: bool,
    message: &str,
    operation: impl FnOnce(&mut dyn ProgressCallback) -> T,
) -> T {
    if enabled && CliProgress::should_show() {
        let mut progress = CliProgress::new(message);
        operation(&mut progress)
    } else {
        operation(&mut NoopProgress)
    }
}

/// Converts bytes to human-readable format (KB, MB, GB).
#[allow(clippy::cast_precision_loss)]
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_bytes() {
        assert_eq!(humanize_bytes(0), "0 B");
        assert_eq!(humanize_bytes(1023), "1023 B");
        assert_eq!(humanize_bytes(1024), "1.0 KB");
        assert_eq!(humanize_bytes(1536), "1.5 KB");
        assert_eq!(humanize_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(humanize_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_progress_callback() {
        let mut progress = CliProgress::new("Testing");

        progress.on_entry_start(Path::new("a.log"), 2, 1);
        progress.on_bytes_written(1024);
        progress.on_entry_complete(Path::new("a.log"));
        progress.on_bytes_written(1024);

        assert_eq!(progress.bytes_written, 2048);
        assert_eq!(progress.bar.length(), Some(2));
        assert_eq!(progress.bar.position(), 1);
    }

    #[test]
    fn test_with_progress_disabled_uses_noop() {
        let value = with_progress(false, "Testing", |progress| {
            progress.on_entry_start(Path::new("x"), 1, 1);
            progress.on_complete();
            7
        });
        assert_eq!(value, 7);
    }
}
