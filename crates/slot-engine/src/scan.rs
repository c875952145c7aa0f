//! Coarse per-date availability over a date range, for calendar pickers.
//!
//! This scan only asks whether a date *could* have open time. It does not
//! generate slots, so an available override with a narrowing window that fits
//! nothing still counts as available here.

use chrono::{Days, NaiveDate};

use crate::model::{AvailabilitySlot, DateOverride, EventType};
use crate::resolver::find_override;
use crate::time::day_of_week;

/// Dates in `[start, end]` (inclusive, ascending) that have open time.
///
/// A date qualifies when it has an available override, or when it has no
/// override and at least one weekly slot falls on its weekday. A blocking
/// override always excludes the date. Returns an empty list when `start > end`.
pub fn scan_available_dates(
    start: NaiveDate,
    end: NaiveDate,
    slots: &[AvailabilitySlot],
    overrides: &[DateOverride],
) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| date_has_availability(*d, slots, overrides))
        .collect()
}

fn date_has_availability(date: NaiveDate, slots: &[AvailabilitySlot], overrides: &[DateOverride]) -> bool {
    match find_override(date, overrides) {
        Some(ovr) => ovr.is_available,
        None => {
            let weekday = day_of_week(date);
            slots.iter().any(|s| s.day_of_week == weekday)
        }
    }
}

/// Last date inside the scheduling horizon starting from `today`.
pub fn horizon_end(today: NaiveDate, max_future_days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(max_future_days)))
        .unwrap_or(NaiveDate::MAX)
}

pub fn within_horizon(date: NaiveDate, today: NaiveDate, max_future_days: u32) -> bool {
    date >= today && date <= horizon_end(today, max_future_days)
}

/// [`scan_available_dates`] from `today` to the end of the event type's horizon.
pub fn scan_bookable_dates(
    today: NaiveDate,
    event_type: &EventType,
    slots: &[AvailabilitySlot],
    overrides: &[DateOverride],
) -> Vec<NaiveDate> {
    scan_available_dates(today, horizon_end(today, event_type.max_future_days), slots, overrides)
}
