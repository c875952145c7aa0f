//! JSON snapshot of everything slot computation reads.
//!
//! Front ends that fetch data over the network (the CLI, the WASM bindings)
//! hand the engine one document instead of wiring up a store:
//!
//! ```json
//! {
//!   "timezone": "America/New_York",
//!   "slots": [{ "day_of_week": 1, "start_time": "09:00", "end_time": "17:00" }],
//!   "overrides": [{ "date": "2026-03-16", "is_available": false }],
//!   "bookings": [],
//!   "busy": [],
//!   "event_type": {
//!     "duration_minutes": 30, "buffer_before_minutes": 0, "buffer_after_minutes": 0,
//!     "min_notice_minutes": 60, "max_future_days": 30
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::busy::{with_busy_intervals, BusyInterval};
use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};
use crate::model::{AvailabilitySlot, DateOverride, EventType};
use crate::slots::Availability;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub slots: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub overrides: Vec<DateOverride>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub busy: Vec<BusyInterval>,
    #[serde(default)]
    pub event_type: Option<EventType>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Availability in the snapshot's timezone, or `default_timezone` when the
    /// snapshot names none.
    pub fn availability(&self, default_timezone: &str, policy: DstPolicy) -> Result<Availability> {
        let tz = self.timezone.as_deref().unwrap_or(default_timezone);
        Ok(Availability::new(tz, self.slots.clone(), self.overrides.clone())?.with_dst_policy(policy))
    }

    /// Bookings plus the snapshot's external busy periods.
    pub fn blocking_bookings(&self) -> Vec<Booking> {
        with_busy_intervals(&self.bookings, &self.busy)
    }

    /// # Errors
    /// `SlotError::InvalidEventType` if the snapshot carries no event type.
    pub fn event_type(&self) -> Result<&EventType> {
        self.event_type
            .as_ref()
            .ok_or_else(|| SlotError::InvalidEventType("snapshot has no event_type".to_string()))
    }
}
