//! Input and output types shared by the resolver, generator, and scanner.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::time::TimeOfDay;

/// One recurring weekly window of availability within a [`Schedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    #[serde(default)]
    pub schedule_id: String,
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// A named set of weekly slots anchored to an IANA timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// IANA timezone name, e.g. "America/New_York".
    pub timezone: String,
    #[serde(default)]
    pub slots: Vec<AvailabilitySlot>,
}

/// A one-off change to availability for a single calendar date.
///
/// When `is_available` is false the whole date is blocked. When it is true and
/// both times are present, that window replaces the weekly slots for the date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOverride {
    pub date: NaiveDate,
    pub is_available: bool,
    #[serde(default)]
    pub start_time: Option<TimeOfDay>,
    #[serde(default)]
    pub end_time: Option<TimeOfDay>,
}

/// Timing rules of a bookable meeting type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub schedule_id: String,
    pub duration_minutes: u32,
    pub buffer_before_minutes: u32,
    pub buffer_after_minutes: u32,
    pub min_notice_minutes: u32,
    pub max_future_days: u32,
    #[serde(default)]
    pub requires_confirmation: bool,
}

impl EventType {
    /// Reject timing rules no slot could ever be generated from.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidEventType` when the duration is zero or longer
    /// than a day.
    pub fn validate(&self) -> Result<()> {
        check_duration(self.duration_minutes)
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn min_notice(&self) -> Duration {
        Duration::minutes(i64::from(self.min_notice_minutes))
    }
}

/// A meeting length must be at least a minute and no longer than a day.
pub(crate) fn check_duration(minutes: u32) -> Result<()> {
    if minutes == 0 {
        return Err(SlotError::InvalidEventType(
            "duration must be at least one minute".to_string(),
        ));
    }
    if minutes > 24 * 60 {
        return Err(SlotError::InvalidEventType(format!(
            "duration of {} minutes exceeds one day",
            minutes
        )));
    }
    Ok(())
}

/// An effective open interval `[start, end)` on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A candidate booking window produced by the slot generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available: bool,
}
