//! Parsing of the server's HTML directory listing.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::Timestamp;

#[allow(clippy::expect_used)]
static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+href="(logcat\.dump\.(\d{14})\.log[^"/\\]*)">logcat\.dump\.\d+\.log"#)
        .expect("listing href pattern is valid")
});

/// A log file offered by the remote server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteLog {
    /// Absolute URL of the file.
    pub url: String,

    /// File name to store the download under.
    pub file_name: String,

    /// Timestamp encoded in the file name.
    pub timestamp: Timestamp,
}

/// Extracts the log files listed in `body` that are not older than `since`.
///
/// Each line contributes at most one entry. Links whose 14 embedded digits
/// are not a real date-time (such as `20161399999999`) are skipped, even when
/// the digits compare numerically greater than `since`; only validated
/// timestamps are compared. URLs are built as `<device_url>/<href>`.
///
/// # Examples
///
/// ```
/// use logpull_core::Timestamp;
/// use logpull_core::remote::parse_listing;
///
/// let body = r#"<a href="logcat.dump.20160503082219.log.zip">logcat.dump.20160503082219.log.zip</a>"#;
/// let since = Timestamp::parse("20160101000000").unwrap();
///
/// let logs = parse_listing(body, "http://host/logs/42", since);
/// assert_eq!(logs.len(), 1);
/// assert_eq!(logs[0].url, "http://host/logs/42/logcat.dump.20160503082219.log.zip");
/// ```
#[must_use]
pub fn parse_listing(body: &str, device_url: &str, since: Timestamp) -> Vec<RemoteLog> {
    let base = device_url.trim_end_matches('/');

    body.lines()
        .filter_map(|line| HREF.captures(line))
        .filter_map(|caps| {
            let href = caps.get(1)?.as_str();
            let digits = caps.get(2)?.as_str();
            match Timestamp::parse(digits) {
                Ok(timestamp) => Some((href, timestamp)),
                Err(e) => {
                    debug!("ignoring {href}: {e}");
                    None
                }
            }
        })
        .filter(|(_, timestamp)| *timestamp >= since)
        .map(|(href, timestamp)| RemoteLog {
            url: format!("{base}/{href}"),
            file_name: href.to_owned(),
            timestamp,
        })
        .collect()
}
