//! Exact modification timestamps
//!
//! mtree records `time=` as decimal epoch seconds. Comparing those through
//! `f64` would lose nanoseconds on current epochs, so the value is kept as an
//! integer pair and compared exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Seconds and nanoseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub secs: i64,
    pub nanos: u32,
}

/// A `time=` value that is not a decimal number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp: {0}")]
pub struct InvalidTimestamp(pub String);

impl Timestamp {
    /// Create a timestamp, normalizing nanoseconds
    #[must_use]
    pub fn new(secs: i64, nanos: u32) -> Self {
        Self {
            secs: secs + i64::from(nanos / NANOS_PER_SEC),
            nanos: nanos % NANOS_PER_SEC,
        }
    }

    /// Build from the `st_mtime`/`st_mtime_nsec` pair reported by `lstat`
    #[must_use]
    pub fn from_stat(secs: i64, nsec: i64) -> Self {
        let nanos = u32::try_from(nsec.clamp(0, i64::from(NANOS_PER_SEC - 1))).unwrap_or(0);
        Self::new(secs, nanos)
    }
}

impl FromStr for Timestamp {
    type Err = InvalidTimestamp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTimestamp(s.to_string());
        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        let (negative, digits) = match whole.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, whole),
        };

        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let secs: i64 = whole.parse().map_err(|_| invalid())?;

        // Digits past nanosecond precision are truncated
        let mut nanos = 0u32;
        let mut scale = NANOS_PER_SEC / 10;
        for digit in fraction.bytes().take(9) {
            nanos += u32::from(digit - b'0') * scale;
            scale /= 10;
        }

        // Before the epoch the fraction counts back from `secs`; store it the
        // way `lstat` does, with non-negative nanoseconds
        if negative && nanos > 0 {
            let secs = secs.checked_sub(1).ok_or_else(invalid)?;
            return Ok(Self::new(secs, NANOS_PER_SEC - nanos));
        }

        Ok(Self::new(secs, nanos))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_seconds() {
        let ts: Timestamp = "1695042345".parse().unwrap();
        assert_eq!(ts, Timestamp::new(1_695_042_345, 0));
        let ts: Timestamp = "1695042345.0".parse().unwrap();
        assert_eq!(ts, Timestamp::new(1_695_042_345, 0));
    }

    #[test]
    fn test_parse_fraction() {
        let ts: Timestamp = "1695042345.25".parse().unwrap();
        assert_eq!(ts.nanos, 250_000_000);
        let ts: Timestamp = "1.123456789123".parse().unwrap();
        assert_eq!(ts.nanos, 123_456_789);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Timestamp>().is_err());
        assert!(".5".parse::<Timestamp>().is_err());
        assert!("12a".parse::<Timestamp>().is_err());
        assert!("12.3e4".parse::<Timestamp>().is_err());
        assert!("+12".parse::<Timestamp>().is_err());
        assert!("-".parse::<Timestamp>().is_err());
        assert!("--1".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_parse_before_epoch() {
        let ts: Timestamp = "-1.5".parse().unwrap();
        assert_eq!(ts, Timestamp::new(-2, 500_000_000));
        let ts: Timestamp = "-0.25".parse().unwrap();
        assert_eq!(ts, Timestamp::new(-1, 750_000_000));
        let ts: Timestamp = "-3".parse().unwrap();
        assert_eq!(ts, Timestamp::new(-3, 0));
        assert_eq!(Timestamp::from_stat(-2, 500_000_000), "-1.5".parse().unwrap());
    }

    #[test]
    fn test_from_stat() {
        assert_eq!(Timestamp::from_stat(10, 5), Timestamp::new(10, 5));
        assert_eq!(Timestamp::from_stat(10, -1).nanos, 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Timestamp::new(7, 5).to_string(), "7.000000005");
    }
}
