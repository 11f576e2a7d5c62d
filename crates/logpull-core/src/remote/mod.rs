//! Remote log server access: directory listing parsing and downloads.

pub mod client;
pub mod listing;

pub use client::RemoteClient;
pub use listing::RemoteLog;
pub use listing::parse_listing;
