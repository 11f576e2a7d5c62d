//! Check-date command implementation.

use crate::cli::CheckDateArgs;
use crate::error::add_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use logpull_core::Timestamp;

pub fn execute(args: &CheckDateArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let timestamp = add_context(Timestamp::parse(&args.date), &args.date)?;
    formatter.format_timestamp(&timestamp)
}
