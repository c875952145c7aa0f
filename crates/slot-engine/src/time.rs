//! Time-of-day primitives: `HH:MM` parsing and formatting, weekday indexing.
//!
//! Weekly availability is stored as wall-clock times with no date attached.
//! [`TimeOfDay`] is that value; it orders naturally, so comparing two times is
//! plain `<`/`>`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hours: u8,
    minutes: u8,
}

impl TimeOfDay {
    /// Build a time of day, rejecting out-of-range components.
    pub fn new(hours: u8, minutes: u8) -> Result<Self> {
        if hours > 23 || minutes > 59 {
            return Err(SlotError::InvalidFormat(format!("{}:{}", hours, minutes)));
        }
        Ok(Self { hours, minutes })
    }

    pub fn hours(self) -> u8 {
        self.hours
    }

    pub fn minutes(self) -> u8 {
        self.minutes
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(self) -> u32 {
        u32::from(self.hours) * 60 + u32::from(self.minutes)
    }

    pub fn to_naive_time(self) -> NaiveTime {
        // Components are range-checked on construction, so the fallback is unreachable.
        NaiveTime::from_hms_opt(u32::from(self.hours), u32::from(self.minutes), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

/// Parse an `"HH:MM"` string into a [`TimeOfDay`].
///
/// The input must be exactly two colon-separated unsigned integers (one or two
/// digits each), with hours in `0..=23` and minutes in `0..=59`.
///
/// # Errors
/// Returns `SlotError::InvalidFormat` for anything else; nothing is coerced.
pub fn parse_time_of_day(s: &str) -> Result<TimeOfDay> {
    let invalid = || SlotError::InvalidFormat(s.to_string());

    let mut parts = s.split(':');
    let (Some(h), Some(m), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let field = |part: &str| -> Result<u8> {
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse::<u8>().map_err(|_| invalid())
    };

    let hours = field(h)?;
    let minutes = field(m)?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(TimeOfDay { hours, minutes })
}

/// Format a [`TimeOfDay`] as zero-padded `"HH:MM"`.
pub fn format_time_of_day(time: TimeOfDay) -> String {
    format!("{:02}:{:02}", time.hours, time.minutes)
}

/// Weekday index of a calendar date, 0 = Sunday through 6 = Saturday.
///
/// Uses the same numbering as `AvailabilitySlot::day_of_week`.
pub fn day_of_week(date: NaiveDate) -> u8 {
    // num_days_from_sunday is always in 0..=6.
    date.weekday().num_days_from_sunday() as u8
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        parse_time_of_day(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = SlotError;

    fn try_from(s: String) -> Result<Self> {
        parse_time_of_day(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        format_time_of_day(t)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}
