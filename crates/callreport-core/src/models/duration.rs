//! Call duration in the `"<minutes>m <seconds>s"` form
//!
//! Records carry their duration as display text (`"3m 45s"`). Aggregation
//! needs whole seconds, so this module owns both directions of the
//! conversion and the rounding used when averaging.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error raised when a duration string does not match `"<m>m <s>s"`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("expected \"<minutes>m <seconds>s\", got {0:?}")]
    Format(String),

    #[error("seconds component {0} is outside 0-59")]
    SecondsOutOfRange(u64),
}

/// Elapsed call time with second precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CallDuration(u64);

impl CallDuration {
    pub const ZERO: CallDuration = CallDuration(0);

    /// Create a duration from total seconds
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Total seconds
    #[inline]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Whole minutes component
    #[inline]
    pub const fn minutes(&self) -> u64 {
        self.0 / 60
    }

    /// Seconds component, always in 0-59
    #[inline]
    pub const fn seconds(&self) -> u64 {
        self.0 % 60
    }

    /// Arithmetic mean of `count` durations summing to `total_secs`,
    /// rounded half-up to the nearest second.
    ///
    /// The sum is taken as `u128` so that adding any number of valid
    /// durations cannot wrap. A zero count yields [`CallDuration::ZERO`].
    pub fn mean(total_secs: u128, count: u64) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        let count = u128::from(count);
        // floor(total / count + 1/2) without leaving integer arithmetic
        let secs = total_secs.saturating_mul(2).saturating_add(count) / (2 * count);
        // the mean never exceeds the largest summed duration
        Self(u64::try_from(secs).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for CallDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {:02}s", self.minutes(), self.seconds())
    }
}

impl FromStr for CallDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || DurationParseError::Format(s.to_string());

        // exactly one space between the components
        let (minutes, seconds) = s.trim().split_once(' ').ok_or_else(format_err)?;

        let minutes = parse_component(minutes, 'm')
            .filter(|digits| digits.len() == 1 || !digits.starts_with('0'))
            .ok_or_else(format_err)?;
        let seconds = parse_component(seconds, 's')
            .filter(|digits| digits.len() <= 2)
            .ok_or_else(format_err)?;

        let minutes: u64 = minutes.parse().map_err(|_| format_err())?;
        let seconds: u64 = seconds.parse().map_err(|_| format_err())?;

        if seconds >= 60 {
            return Err(DurationParseError::SecondsOutOfRange(seconds));
        }

        minutes
            .checked_mul(60)
            .and_then(|secs| secs.checked_add(seconds))
            .map(Self)
            .ok_or_else(format_err)
    }
}

/// Digits of `"<digits><unit>"`, rejecting signs and empty digit runs
fn parse_component(token: &str, unit: char) -> Option<&str> {
    let digits = token.strip_suffix(unit)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}

impl TryFrom<String> for CallDuration {
    type Error = DurationParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CallDuration> for String {
    fn from(duration: CallDuration) -> Self {
        duration.to_string()
    }
}
