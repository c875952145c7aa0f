//! DST transition policies for anchoring wall-clock availability to instants.
//!
//! Weekly slots say "09:00-17:00 on Mondays" in the host's zone. Turning that
//! into UTC is unambiguous except on transition days, where a local time can
//! occur twice (fold) or not at all (gap).

use chrono::{DateTime, Duration, LocalResult, NaiveDate, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

/// Policy for wall-clock times that fall in a DST gap.
///
/// Folds always resolve to the earlier of the two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Drop any interval with a boundary inside the gap.
    Skip,
    /// Move the time forward by the length of the gap (02:30 becomes 03:30
    /// when clocks jump from 02:00 to 03:00).
    #[default]
    ShiftForward,
}

/// Resolve a wall-clock time on `date` in `tz` to a UTC instant.
///
/// Returns `None` only when the time falls in a gap and the policy is
/// [`DstPolicy::Skip`].
pub fn localize(date: NaiveDate, time: TimeOfDay, tz: Tz, policy: DstPolicy) -> Option<DateTime<Utc>> {
    let naive = date.and_time(time.to_naive_time());

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Skip => None,
            DstPolicy::ShiftForward => {
                // Interpret the local time with the offset in force before the
                // transition. No zone has a gap longer than a few hours.
                let before = tz
                    .from_local_datetime(&(naive - Duration::hours(6)))
                    .earliest()?;
                let offset = before.offset().fix().local_minus_utc();
                Some((naive - Duration::seconds(i64::from(offset))).and_utc())
            }
        },
    }
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> crate::error::Result<Tz> {
    name.parse()
        .map_err(|_| crate::error::SlotError::InvalidTimezone(name.to_string()))
}
