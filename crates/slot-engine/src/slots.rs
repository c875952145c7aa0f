//! Generate bookable time slots for a single date.
//!
//! Each effective open interval is walked on a fixed 15-minute grid. Every grid
//! position whose window fits inside the interval becomes a candidate; the
//! candidate is dropped if it starts before the minimum-notice threshold and
//! otherwise emitted with `available` set by the conflict check.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::booking::Booking;
use crate::conflict::{blocks, Buffers};
use crate::dst::{parse_timezone, DstPolicy};
use crate::error::Result;
use crate::model::{check_duration, AvailabilitySlot, DateOverride, EventType, Interval, TimeSlot};
use crate::resolver::resolve_effective_intervals_with_policy;

/// Distance between consecutive candidate start times.
pub const SLOT_STEP_MINUTES: i64 = 15;

/// A host's availability snapshot: weekly slots and date overrides anchored to
/// the schedule's timezone.
#[derive(Debug, Clone)]
pub struct Availability {
    pub timezone: Tz,
    pub slots: Vec<AvailabilitySlot>,
    pub overrides: Vec<DateOverride>,
    pub dst_policy: DstPolicy,
}

impl Availability {
    /// Build a snapshot from an IANA timezone name.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimezone` if `timezone` is not a known zone.
    pub fn new(
        timezone: &str,
        slots: Vec<AvailabilitySlot>,
        overrides: Vec<DateOverride>,
    ) -> Result<Self> {
        Ok(Self {
            timezone: parse_timezone(timezone)?,
            slots,
            overrides,
            dst_policy: DstPolicy::default(),
        })
    }

    pub fn with_dst_policy(mut self, policy: DstPolicy) -> Self {
        self.dst_policy = policy;
        self
    }

    /// Effective open intervals for `date`.
    pub fn intervals_on(&self, date: NaiveDate) -> Vec<Interval> {
        resolve_effective_intervals_with_policy(
            date,
            &self.slots,
            &self.overrides,
            self.timezone,
            self.dst_policy,
        )
    }
}

/// Generate the candidate slots for `date`.
///
/// `duration_minutes` is the length of every emitted window; buffers and
/// minimum notice come from `event_type`. `now` anchors the notice threshold
/// and is never read from the system clock.
///
/// Slots are grouped per open interval in resolver order, ascending within each
/// interval. They are not merged or deduplicated across intervals.
///
/// # Errors
/// Returns `SlotError::InvalidEventType` if `duration_minutes` is zero or the
/// event type fails validation. Nothing is returned on error.
pub fn generate_time_slots(
    date: NaiveDate,
    duration_minutes: u32,
    availability: &Availability,
    bookings: &[Booking],
    event_type: &EventType,
    now: DateTime<Utc>,
) -> Result<Vec<TimeSlot>> {
    event_type.validate()?;
    check_duration(duration_minutes)?;

    let intervals = availability.intervals_on(date);
    let slots = slots_for_intervals(&intervals, duration_minutes, bookings, event_type, now);

    tracing::debug!(
        %date,
        intervals = intervals.len(),
        slots = slots.len(),
        available = slots.iter().filter(|s| s.available).count(),
        "generated time slots"
    );
    Ok(slots)
}

/// Walk already-resolved intervals and produce candidate slots.
///
/// This is the grid walk behind [`generate_time_slots`] with no validation.
/// A zero `duration_minutes` yields no slots.
pub fn slots_for_intervals(
    intervals: &[Interval],
    duration_minutes: u32,
    bookings: &[Booking],
    event_type: &EventType,
    now: DateTime<Utc>,
) -> Vec<TimeSlot> {
    if duration_minutes == 0 {
        return Vec::new();
    }

    let duration = Duration::minutes(i64::from(duration_minutes));
    let step = Duration::minutes(SLOT_STEP_MINUTES);
    let min_notice_threshold = now + event_type.min_notice();
    let buffers = Buffers::from(event_type);

    let mut slots = Vec::new();
    for interval in intervals {
        let mut cursor = interval.start;
        while cursor + duration <= interval.end {
            let end = cursor + duration;
            // Too-soon candidates are suppressed entirely, not reported as unavailable.
            if cursor >= min_notice_threshold {
                let conflict = bookings.iter().any(|b| blocks(cursor, end, b, buffers));
                slots.push(TimeSlot {
                    start: cursor,
                    end,
                    available: !conflict,
                });
            }
            cursor += step;
        }
    }

    slots
}
