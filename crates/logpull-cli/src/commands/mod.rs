//! Subcommand implementations.

pub mod check_date;
pub mod extract;
pub mod fetch;
pub mod merge;
