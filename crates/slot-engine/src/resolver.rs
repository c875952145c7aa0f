//! Resolve weekly recurring availability against date overrides.
//!
//! The result for one calendar date is a list of effective open intervals in
//! absolute time. Overlapping weekly slots are kept as separate intervals; the
//! generator processes each one on its own.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::dst::{localize, DstPolicy};
use crate::model::{AvailabilitySlot, DateOverride, Interval};
use crate::time::{day_of_week, TimeOfDay};

/// The override that applies to `date`, if any. The first match wins.
pub fn find_override(date: NaiveDate, overrides: &[DateOverride]) -> Option<&DateOverride> {
    overrides.iter().find(|o| o.date == date)
}

/// Effective open intervals for `date`, using [`DstPolicy::ShiftForward`].
///
/// See [`resolve_effective_intervals_with_policy`].
pub fn resolve_effective_intervals(
    date: NaiveDate,
    slots: &[AvailabilitySlot],
    overrides: &[DateOverride],
    tz: Tz,
) -> Vec<Interval> {
    resolve_effective_intervals_with_policy(date, slots, overrides, tz, DstPolicy::default())
}

/// Effective open intervals for `date`.
///
/// - An override with `is_available == false` blocks the date: empty result.
/// - An available override carrying both times yields exactly that window,
///   replacing every weekly slot for the date.
/// - Otherwise each weekly slot on the date's weekday becomes one interval, in
///   input order, with no merging.
///
/// An override whose start is not before its end still yields its single
/// window; no slot fits inside it downstream.
pub fn resolve_effective_intervals_with_policy(
    date: NaiveDate,
    slots: &[AvailabilitySlot],
    overrides: &[DateOverride],
    tz: Tz,
    policy: DstPolicy,
) -> Vec<Interval> {
    if let Some(ovr) = find_override(date, overrides) {
        if !ovr.is_available {
            tracing::debug!(%date, "date blocked by override");
            return Vec::new();
        }
        if let (Some(start), Some(end)) = (ovr.start_time, ovr.end_time) {
            tracing::debug!(%date, %start, %end, "override replaces weekly slots");
            return to_interval(date, start, end, tz, policy).into_iter().collect();
        }
    }

    let weekday = day_of_week(date);
    let intervals: Vec<Interval> = slots
        .iter()
        .filter(|s| s.day_of_week == weekday)
        .filter_map(|s| to_interval(date, s.start_time, s.end_time, tz, policy))
        .collect();

    tracing::trace!(%date, weekday, count = intervals.len(), "resolved weekly slots");
    intervals
}

fn to_interval(
    date: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
    tz: Tz,
    policy: DstPolicy,
) -> Option<Interval> {
    let start = localize(date, start, tz, policy)?;
    let end = localize(date, end, tz, policy)?;
    Some(Interval::new(start, end))
}
