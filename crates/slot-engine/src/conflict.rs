//! Detect overlap between a candidate window and existing bookings.
//!
//! Each non-cancelled booking is widened by the buffers before it is compared,
//! so a candidate may not start or end inside the padding around a booking.
//! Intervals are half-open: a candidate ending exactly where an (unbuffered)
//! booking starts is NOT a conflict.

use chrono::{DateTime, Duration, Utc};

use crate::booking::Booking;
use crate::model::EventType;

/// Padding applied around existing bookings, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buffers {
    pub before_minutes: u32,
    pub after_minutes: u32,
}

impl Buffers {
    pub const NONE: Buffers = Buffers {
        before_minutes: 0,
        after_minutes: 0,
    };

    pub fn new(before_minutes: u32, after_minutes: u32) -> Self {
        Self {
            before_minutes,
            after_minutes,
        }
    }

    /// The booking's `[start - before, end + after)` range.
    pub fn expand(&self, booking: &Booking) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            booking.start - Duration::minutes(i64::from(self.before_minutes)),
            booking.end + Duration::minutes(i64::from(self.after_minutes)),
        )
    }
}

impl From<&EventType> for Buffers {
    fn from(event_type: &EventType) -> Self {
        Self::new(event_type.buffer_before_minutes, event_type.buffer_after_minutes)
    }
}

/// A booking that blocks a candidate window.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict<'a> {
    pub booking: &'a Booking,
    /// Minutes of the candidate covered by the buffered booking.
    pub overlap_minutes: i64,
}

/// Three-case overlap test on half-open intervals: the candidate starts inside
/// the blocked range, ends inside it, or fully contains it.
fn overlaps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    blocked_start: DateTime<Utc>,
    blocked_end: DateTime<Utc>,
) -> bool {
    (start >= blocked_start && start < blocked_end)
        || (end > blocked_start && end <= blocked_end)
        || (start <= blocked_start && end >= blocked_end)
}

/// Whether `[start, end)` overlaps any non-cancelled booking once that booking
/// is widened by `buffer_before_minutes` / `buffer_after_minutes`.
///
/// Returns false for an empty booking list.
pub fn has_conflict(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    bookings: &[Booking],
    buffer_before_minutes: u32,
    buffer_after_minutes: u32,
) -> bool {
    let buffers = Buffers::new(buffer_before_minutes, buffer_after_minutes);
    bookings.iter().any(|b| blocks(start, end, b, buffers))
}

/// Find every non-cancelled booking that blocks `[start, end)`.
///
/// The overlap duration is `min(end, blocked_end) - max(start, blocked_start)`,
/// clamped at zero for degenerate inputs.
pub fn find_conflicts<'a>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    bookings: &'a [Booking],
    buffers: Buffers,
) -> Vec<Conflict<'a>> {
    bookings
        .iter()
        .filter(|b| blocks(start, end, b, buffers))
        .map(|booking| {
            let (blocked_start, blocked_end) = buffers.expand(booking);
            let overlap = (end.min(blocked_end) - start.max(blocked_start)).num_minutes();
            Conflict {
                booking,
                overlap_minutes: overlap.max(0),
            }
        })
        .collect()
}

pub(crate) fn blocks(start: DateTime<Utc>, end: DateTime<Utc>, booking: &Booking, buffers: Buffers) -> bool {
    if !booking.status.blocks_time() {
        return false;
    }
    let (blocked_start, blocked_end) = buffers.expand(booking);
    overlaps(start, end, blocked_start, blocked_end)
}
