//! Storage seam for the scheduler.
//!
//! The engine never persists anything itself. A [`SchedulingStore`] hands it
//! snapshots of one host's schedules, overrides, event types, and bookings,
//! and accepts new or updated bookings.

use std::collections::HashMap;

use crate::booking::Booking;
use crate::error::{Result, SlotError};
use crate::model::{DateOverride, EventType, Schedule};

pub trait SchedulingStore {
    fn schedule(&self, id: &str) -> Result<Schedule>;

    fn date_overrides(&self) -> Result<Vec<DateOverride>>;

    fn event_type(&self, id: &str) -> Result<EventType>;

    /// All bookings for the host, in every status.
    fn bookings(&self) -> Result<Vec<Booking>>;

    fn booking(&self, id: &str) -> Result<Booking> {
        self.bookings()?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or_else(|| SlotError::NotFound {
                kind: "booking",
                id: id.to_string(),
            })
    }

    fn insert_booking(&mut self, booking: Booking) -> Result<()>;

    fn update_booking(&mut self, booking: Booking) -> Result<()>;
}

/// A [`SchedulingStore`] held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    schedules: HashMap<String, Schedule>,
    event_types: HashMap<String, EventType>,
    overrides: Vec<DateOverride>,
    bookings: Vec<Booking>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedules.insert(schedule.id.clone(), schedule);
        self
    }

    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_types.insert(event_type.id.clone(), event_type);
        self
    }

    pub fn with_override(mut self, date_override: DateOverride) -> Self {
        self.overrides.push(date_override);
        self
    }

    pub fn with_booking(mut self, booking: Booking) -> Self {
        self.bookings.push(booking);
        self
    }
}

impl SchedulingStore for InMemoryStore {
    fn schedule(&self, id: &str) -> Result<Schedule> {
        self.schedules.get(id).cloned().ok_or_else(|| SlotError::NotFound {
            kind: "schedule",
            id: id.to_string(),
        })
    }

    fn date_overrides(&self) -> Result<Vec<DateOverride>> {
        Ok(self.overrides.clone())
    }

    fn event_type(&self, id: &str) -> Result<EventType> {
        self.event_types.get(id).cloned().ok_or_else(|| SlotError::NotFound {
            kind: "event type",
            id: id.to_string(),
        })
    }

    fn bookings(&self) -> Result<Vec<Booking>> {
        Ok(self.bookings.clone())
    }

    fn insert_booking(&mut self, booking: Booking) -> Result<()> {
        if self.bookings.iter().any(|b| b.id == booking.id) {
            return Err(SlotError::DuplicateId(booking.id));
        }
        self.bookings.push(booking);
        Ok(())
    }

    fn update_booking(&mut self, booking: Booking) -> Result<()> {
        let existing = self
            .bookings
            .iter_mut()
            .find(|b| b.id == booking.id)
            .ok_or_else(|| SlotError::NotFound {
                kind: "booking",
                id: booking.id.clone(),
            })?;
        *existing = booking;
        Ok(())
    }
}
