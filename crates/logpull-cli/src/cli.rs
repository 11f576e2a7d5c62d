//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

/// Log server used when neither `--base-url` nor `LOGPULL_BASE_URL` is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/logs/";

/// Viewer launched on the merged log; `{}` is replaced by its path.
pub const DEFAULT_VIEWER: &str = "java -jar LogcatFileReader-2.0.0.jar {} threadtime";

#[derive(Parser)]
#[command(name = "logpull")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = "Example: logpull fetch -u 2060900675 -d 20160420153000")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a device's logs, unpack them, merge them and open the result
    Fetch(FetchArgs),
    /// Extract a zip archive
    Extract(ExtractArgs),
    /// Merge logcat dump fragments in a folder into one file
    Merge(MergeArgs),
    /// Check that a date string is a valid YYYYMMDDHHMMSS timestamp
    CheckDate(CheckDateArgs),
}

#[derive(clap::Args)]
pub struct FetchArgs {
    /// Device user id whose logs are fetched
    #[arg(short = 'u', long = "device", value_name = "DEVICE_ID")]
    pub device: String,

    /// Oldest log to fetch, accurate to seconds (default: now)
    #[arg(short, long, value_name = "YYYYMMDDHHMMSS")]
    pub date: Option<String>,

    /// Base URL of the log server
    #[arg(long, env = "LOGPULL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Working folder; removed and recreated on every run
    #[arg(long, value_name = "DIR", default_value = "logs")]
    pub logs_dir: PathBuf,

    /// Connect and read timeout in seconds
    #[arg(long, value_name = "SECS", default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Viewer command; `{}` is replaced by the merged log path
    #[arg(long, value_name = "CMD", default_value = DEFAULT_VIEWER)]
    pub viewer: String,

    /// Do not launch the viewer
    #[arg(long)]
    pub no_view: bool,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the zip archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Remove the archive once extraction has run
    #[arg(long)]
    pub delete_source: bool,

    /// Do not apply permissions stored in the archive
    #[arg(long)]
    pub no_permissions: bool,
}

#[derive(clap::Args)]
pub struct MergeArgs {
    /// Folder searched recursively for logcat.dump.<YYYYMMDDHHMMSS>.log files
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,
}

#[derive(clap::Args)]
pub struct CheckDateArgs {
    /// Date string to validate
    #[arg(value_name = "YYYYMMDDHHMMSS")]
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_defaults() {
        let cli = Cli::try_parse_from(["logpull", "fetch", "-u", "42"]).unwrap_or_else(|e| panic!("{e}"));
        let Commands::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.device, "42");
        assert!(args.date.is_none());
        assert_eq!(args.logs_dir, PathBuf::from("logs"));
        assert_eq!(args.timeout, 30);
        assert_eq!(args.viewer, DEFAULT_VIEWER);
        assert!(!args.no_view);
    }

    #[test]
    fn test_fetch_zero_timeout_rejected() {
        let result = Cli::try_parse_from(["logpull", "fetch", "-u", "42", "--timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["logpull", "-v", "-q", "merge", "logs"]);
        assert!(result.is_err());
    }
}
