//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use logpull_core::ExtractConfig;
use logpull_core::extract_zip;
use std::env;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let config = ExtractConfig {
        delete_source: args.delete_source,
        preserve_permissions: !args.no_permissions,
        ..Default::default()
    };

    let report = add_context(
        extract_zip(&args.archive, &output_dir, &config),
        &args.archive.display(),
    )?;

    formatter.format_extraction_result(&args.archive, &report)
}
