//! Fourteen-digit `YYYYMMDDHHMMSS` timestamps.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use chrono::Local;
use chrono::NaiveDateTime;
use chrono::SubsecRound;
use chrono::Timelike;

use crate::LogpullError;
use crate::Result;

const FORMAT: &str = "%Y%m%d%H%M%S";
const DIGITS: usize = 14;

/// A validated local date-time with second precision.
///
/// Renders back as exactly 14 digits and orders the same way as its numeric
/// key.
///
/// # Examples
///
/// ```
/// use logpull_core::Timestamp;
///
/// let ts = Timestamp::parse("20160503082219").unwrap();
/// assert_eq!(ts.to_string(), "20160503082219");
/// assert_eq!(ts.as_key(), 20_160_503_082_219);
///
/// assert!(Timestamp::parse("20161303082219").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Parses a 14-digit timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`LogpullError::InvalidTimestamp`] if the value is not exactly
    /// 14 ASCII digits or does not name a real calendar date-time. Leap
    /// seconds (second `60`) are rejected.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |reason: String| LogpullError::InvalidTimestamp {
            value: value.to_owned(),
            reason,
        };

        if value.len() != DIGITS {
            return Err(invalid(format!(
                "expected {DIGITS} digits, got {}",
                value.chars().count()
            )));
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("contains non-digit characters".to_owned()));
        }
        // chrono accepts second 60, which would not survive `as_key`
        if value.ends_with("60") {
            return Err(invalid("leap seconds are not supported".to_owned()));
        }

        NaiveDateTime::parse_from_str(value, FORMAT)
            .map(Self)
            .map_err(|e| invalid(e.to_string()))
    }

    /// Returns the current local time truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        Self(Local::now().naive_local().trunc_subsecs(0))
    }

    /// Returns the timestamp as a `u64` with the same digits.
    #[must_use]
    pub fn as_key(&self) -> u64 {
        let date = self.0.date();
        let time = self.0.time();
        let year = u64::try_from(date.year()).unwrap_or(0);

        [
            (year, 10_000_000_000),
            (u64::from(date.month()), 100_000_000),
            (u64::from(date.day()), 1_000_000),
            (u64::from(time.hour()), 10_000),
            (u64::from(time.minute()), 100),
            (u64::from(time.second()), 1),
        ]
        .iter()
        .map(|(part, scale)| part * scale)
        .sum()
    }

    /// Returns the underlying date-time.
    #[must_use]
    pub const fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = LogpullError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn reason(value: &str) -> String {
        match Timestamp::parse(value) {
            Err(LogpullError::InvalidTimestamp { reason, .. }) => reason,
            other => panic!("expected InvalidTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_and_display() {
        let ts = Timestamp::parse("20160101000001").unwrap();
        assert_eq!(ts.to_string(), "20160101000001");
    }

    #[test]
    fn test_wrong_length() {
        assert!(reason("2016010100000").contains("expected 14 digits"));
        assert!(reason("201601010000011").contains("expected 14 digits"));
        assert!(reason("").contains("got 0"));
    }

    #[test]
    fn test_non_digits() {
        assert!(reason("2016-01-01T000").contains("non-digit"));
        assert!(reason(" 2016010100000").contains("non-digit"));
    }

    #[test]
    fn test_impossible_dates() {
        for value in [
            "20161301000000",
            "20160230000000",
            "20150229000000",
            "20160101250000",
            "20160101006000",
        ] {
            assert!(Timestamp::parse(value).is_err(), "{value} accepted");
        }
        assert!(Timestamp::parse("20160229235959").is_ok());
    }

    #[test]
    fn test_leap_second_rejected() {
        assert!(reason("20161231235960").contains("leap second"));
        assert!(Timestamp::parse("20161231235959").is_ok());
        // Minute 60 stays a calendar error
        assert!(!reason("20160101006000").contains("leap second"));
    }

    #[test]
    fn test_key_matches_digits() {
        for value in ["20160503082219", "19991231235959", "00010101000000"] {
            let ts = Timestamp::parse(value).unwrap();
            assert_eq!(ts.as_key(), value.parse::<u64>().unwrap());
        }
    }

    #[test]
    fn test_ordering_matches_key() {
        let earlier = Timestamp::parse("20160101000059").unwrap();
        let later = Timestamp::parse("20160101000100").unwrap();
        assert!(earlier < later);
        assert!(earlier.as_key() < later.as_key());
    }

    #[test]
    fn test_now_roundtrips() {
        let now = Timestamp::now();
        assert_eq!(now.as_datetime().nanosecond(), 0);
        assert_eq!(Timestamp::parse(&now.to_string()).unwrap(), now);
    }

    #[test]
    fn test_from_str() {
        let ts: Timestamp = "20160503082219".parse().unwrap();
        assert_eq!(ts.as_key(), 20_160_503_082_219);
    }
}
