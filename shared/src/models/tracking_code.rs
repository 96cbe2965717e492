//! Tracking Code Model
//!
//! Public identifier for guest lookup: `SRV-######-####`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Literal prefix of every tracking code
pub const TRACKING_CODE_PREFIX: &str = "SRV";

const CLOCK_DIGITS: usize = 6;
const RANDOM_DIGITS: usize = 4;

/// Upper bound (exclusive) of the clock-derived group
pub const CLOCK_GROUP_MODULUS: u64 = 1_000_000;
/// Upper bound (exclusive) of the random group
pub const RANDOM_GROUP_MODULUS: u32 = 10_000;

/// A validated, normalized (upper-case) tracking code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingCode(String);

/// Error returned when a string is not a well-formed tracking code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed tracking code")]
pub struct MalformedTrackingCode;

impl TrackingCode {
    /// Build a code from its two numeric groups
    ///
    /// Groups are reduced into range, so any clock reading can be passed in.
    pub fn from_parts(clock: u64, random: u32) -> Self {
        Self(format!(
            "{TRACKING_CODE_PREFIX}-{:0cw$}-{:0rw$}",
            clock % CLOCK_GROUP_MODULUS,
            random % RANDOM_GROUP_MODULUS,
            cw = CLOCK_DIGITS,
            rw = RANDOM_DIGITS,
        ))
    }

    /// Parse user input; case-insensitive, surrounding whitespace ignored
    pub fn parse(input: &str) -> Result<Self, MalformedTrackingCode> {
        let normalized = input.trim().to_ascii_uppercase();
        let mut parts = normalized.split('-');
        let (Some(prefix), Some(clock), Some(random), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(MalformedTrackingCode);
        };

        let all_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
        if prefix != TRACKING_CODE_PREFIX
            || !all_digits(clock, CLOCK_DIGITS)
            || !all_digits(random, RANDOM_DIGITS)
        {
            return Err(MalformedTrackingCode);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TrackingCode {
    type Err = MalformedTrackingCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TrackingCode {
    type Error = MalformedTrackingCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TrackingCode> for String {
    fn from(code: TrackingCode) -> Self {
        code.0
    }
}
