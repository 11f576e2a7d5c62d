//! Merge command implementation.

use crate::cli::MergeArgs;
use crate::error::add_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use logpull_core::merge::merge_logcat;

pub fn execute(args: &MergeArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let report = add_context(merge_logcat(&args.folder), &args.folder.display())?;
    formatter.format_merge_result(&report)
}
