//! Busy intervals from connected calendars.
//!
//! External busy blocks are coalesced, then appended to the booking list as
//! synthetic confirmed bookings so the generator and conflict checker treat
//! them exactly like bookings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::{Booking, BookingStatus};

/// A busy period reported by an external calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Merge overlapping or adjacent busy periods.
///
/// Returns a sorted, non-overlapping list. Empty or inverted periods are
/// discarded.
pub fn merge_busy_periods(busy: &[BusyInterval]) -> Vec<BusyInterval> {
    let mut intervals: Vec<BusyInterval> = busy.iter().copied().filter(|b| b.start < b.end).collect();

    // Sort by start time (then by end time for stability).
    intervals.sort_by_key(|b| (b.start, b.end));

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// `bookings` followed by one confirmed booking per merged busy period.
///
/// Synthetic bookings get ids `busy-0`, `busy-1`, ... in start order.
pub fn with_busy_intervals(bookings: &[Booking], busy: &[BusyInterval]) -> Vec<Booking> {
    let merged = merge_busy_periods(busy);
    let mut all = Vec::with_capacity(bookings.len() + merged.len());
    all.extend_from_slice(bookings);
    all.extend(
        merged
            .into_iter()
            .enumerate()
            .map(|(i, b)| Booking::new(format!("busy-{}", i), b.start, b.end, BookingStatus::Confirmed)),
    );
    all
}
