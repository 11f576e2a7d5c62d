//! Logpull CLI - fetch, unpack and merge device logcat dumps.

mod cli;
mod commands;
mod error;
mod output;
mod progress;
mod viewer;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_logging(cli.verbose, cli.quiet);
    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.json && !cli.quiet;

    match &cli.command {
        cli::Commands::Fetch(args) => commands::fetch::execute(args, &*formatter, show_progress),
        cli::Commands::Extract(args) => commands::extract::execute(args, &*formatter),
        cli::Commands::Merge(args) => commands::merge::execute(args, &*formatter),
        cli::Commands::CheckDate(args) => commands::check_date::execute(args, &*formatter),
    }
}

/// Routes `log` records to stderr. `RUST_LOG` takes precedence over the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}
