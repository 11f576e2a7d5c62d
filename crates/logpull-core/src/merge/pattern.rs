//! Fragment file name patterns.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::LogpullError;
use crate::Result;

/// Regex source for `logcat.dump.<YYYYMMDDHHMMSS>.log`.
pub const LOGCAT_FRAGMENT: &str = r"^logcat\.dump\.(\d{14})\.log$";

#[allow(clippy::expect_used)]
static LOGCAT_PATTERN: LazyLock<FragmentPattern> = LazyLock::new(|| {
    FragmentPattern::new(LOGCAT_FRAGMENT).expect("logcat fragment pattern is valid")
});

/// A compiled file name pattern whose first capture group is the ordering key.
///
/// # Examples
///
/// ```
/// use logpull_core::merge::FragmentPattern;
///
/// let pattern = FragmentPattern::logcat();
/// assert_eq!(pattern.key("logcat.dump.20160503082219.log"), Some(20_160_503_082_219));
/// assert_eq!(pattern.key("logcat.dump.2016.log"), None);
///
/// let custom = FragmentPattern::new(r"^part-(\d+)\.txt$").unwrap();
/// assert_eq!(custom.key("part-7.txt"), Some(7));
/// ```
#[derive(Debug, Clone)]
pub struct FragmentPattern {
    regex: Regex,
}

impl FragmentPattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`LogpullError::InvalidPattern`] if the regex does not compile
    /// or has no capture group for the key.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| LogpullError::InvalidPattern(e.to_string()))?;

        // captures_len counts the implicit whole-match group
        if regex.captures_len() < 2 {
            return Err(LogpullError::InvalidPattern(format!(
                "{pattern} has no capture group for the ordering key"
            )));
        }

        Ok(Self { regex })
    }

    /// Returns the shared pattern for logcat dump fragments.
    #[must_use]
    pub fn logcat() -> &'static Self {
        &LOGCAT_PATTERN
    }

    /// Returns `true` if `file_name` matches the pattern.
    #[must_use]
    pub fn is_match(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    /// Extracts the numeric ordering key from `file_name`.
    ///
    /// Returns `None` if the name does not match or the captured text is not
    /// a `u64`.
    #[must_use]
    pub fn key(&self, file_name: &str) -> Option<u64> {
        self.regex
            .captures(file_name)?
            .get(1)?
            .as_str()
            .parse()
            .ok()
    }

    /// Returns the regex source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Display for FragmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_logcat_matches() {
        let pattern = FragmentPattern::logcat();
        assert!(pattern.is_match("logcat.dump.20160101000001.log"));
        assert!(!pattern.is_match("logcat.dump.20160101000001.log.zip"));
        assert!(!pattern.is_match("logcat.dump.2016010100000.log"));
        assert!(!pattern.is_match("logcat.dump.201601010000011.log"));
        assert!(!pattern.is_match("xlogcat.dump.20160101000001.log"));
        assert!(!pattern.is_match("logcatXdump.20160101000001.log"));
    }

    #[test]
    fn test_logcat_key_is_numeric() {
        let pattern = FragmentPattern::logcat();
        assert_eq!(
            pattern.key("logcat.dump.20160101000001.log"),
            Some(20_160_101_000_001)
        );
        assert_eq!(pattern.key("other.log"), None);
    }

    #[test]
    fn test_logcat_is_shared() {
        assert!(std::ptr::eq(FragmentPattern::logcat(), FragmentPattern::logcat()));
        assert_eq!(FragmentPattern::logcat().as_str(), LOGCAT_FRAGMENT);
    }

    #[test]
    fn test_pattern_without_group_rejected() {
        let result = FragmentPattern::new(r"^logcat\.log$");
        assert!(matches!(result, Err(LogpullError::InvalidPattern(_))));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let result = FragmentPattern::new(r"^(unclosed");
        assert!(matches!(result, Err(LogpullError::InvalidPattern(_))));
    }

    #[test]
    fn test_non_numeric_key() {
        let pattern = FragmentPattern::new(r"^part-(\w+)\.txt$").unwrap();
        assert!(pattern.is_match("part-abc.txt"));
        assert_eq!(pattern.key("part-abc.txt"), None);
        assert_eq!(pattern.to_string(), r"^part-(\w+)\.txt$");
    }
}
