//! Booking service over a [`SchedulingStore`].
//!
//! Slot queries read a snapshot that may be stale by the time the guest picks a
//! slot. [`Scheduler::book`] therefore re-runs the conflict check against the
//! store's current bookings and inserts in the same `&mut` borrow, so with an
//! in-process store no other booking can land between check and insert.

use chrono::{DateTime, NaiveDate, Utc};

use crate::booking::{Booking, BookingStatus};
use crate::busy::{with_busy_intervals, BusyInterval};
use crate::conflict::{find_conflicts, Buffers};
use crate::error::{Result, SlotError};
use crate::model::{EventType, TimeSlot};
use crate::scan::{horizon_end, scan_bookable_dates, within_horizon};
use crate::slots::{generate_time_slots, Availability};
use crate::store::SchedulingStore;

/// A guest's request to book one event type at a given start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub id: String,
    pub event_type_id: String,
    pub start: DateTime<Utc>,
}

pub struct Scheduler<S> {
    store: S,
    busy: Vec<BusyInterval>,
}

impl<S: SchedulingStore> Scheduler<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            busy: Vec::new(),
        }
    }

    /// Attach busy periods fetched from a connected calendar.
    pub fn with_busy_intervals(mut self, busy: Vec<BusyInterval>) -> Self {
        self.busy = busy;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn availability_for(&self, event_type: &EventType) -> Result<Availability> {
        let schedule = self.store.schedule(&event_type.schedule_id)?;
        Availability::new(
            &schedule.timezone,
            schedule.slots,
            self.store.date_overrides()?,
        )
    }

    fn blocking_bookings(&self) -> Result<Vec<Booking>> {
        Ok(with_busy_intervals(&self.store.bookings()?, &self.busy))
    }

    /// Candidate slots for one event type on `date`.
    ///
    /// Dates before today or past the event type's horizon (both in the
    /// schedule's timezone) have no slots.
    pub fn available_slots(
        &self,
        event_type_id: &str,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>> {
        let event_type = self.store.event_type(event_type_id)?;
        let availability = self.availability_for(&event_type)?;
        let today = now.with_timezone(&availability.timezone).date_naive();
        if !within_horizon(date, today, event_type.max_future_days) {
            tracing::debug!(%date, %today, "date outside scheduling horizon");
            return Ok(Vec::new());
        }
        let bookings = self.blocking_bookings()?;
        generate_time_slots(
            date,
            event_type.duration_minutes,
            &availability,
            &bookings,
            &event_type,
            now,
        )
    }

    /// Dates from `today` through the event type's horizon that have open time.
    pub fn available_dates(&self, event_type_id: &str, today: NaiveDate) -> Result<Vec<NaiveDate>> {
        let event_type = self.store.event_type(event_type_id)?;
        let schedule = self.store.schedule(&event_type.schedule_id)?;
        let overrides = self.store.date_overrides()?;
        Ok(scan_bookable_dates(today, &event_type, &schedule.slots, &overrides))
    }

    /// Validate and insert a booking.
    ///
    /// # Errors
    /// - `TooSoon` if the start is before `now + min_notice`.
    /// - `BeyondHorizon` if the start's local date is past the horizon.
    /// - `Unavailable` if the window does not fit inside one of the effective
    ///   open intervals of the start's local date.
    /// - `Conflict` if any non-cancelled booking or busy period blocks the
    ///   buffered window.
    /// - Store errors (`NotFound`, `DuplicateId`) are passed through.
    pub fn book(&mut self, request: NewBooking, now: DateTime<Utc>) -> Result<Booking> {
        let event_type = self.store.event_type(&request.event_type_id)?;
        event_type.validate()?;

        let start = request.start;
        let end = start + event_type.duration();

        let threshold = now + event_type.min_notice();
        if start < threshold {
            tracing::debug!(id = %request.id, %start, %threshold, "booking rejected: too soon");
            return Err(SlotError::TooSoon { start, threshold });
        }

        let availability = self.availability_for(&event_type)?;
        let tz = availability.timezone;
        let today = now.with_timezone(&tz).date_naive();
        let local_date = start.with_timezone(&tz).date_naive();
        if local_date > horizon_end(today, event_type.max_future_days) {
            tracing::debug!(id = %request.id, %start, "booking rejected: beyond horizon");
            return Err(SlotError::BeyondHorizon {
                start,
                max_future_days: event_type.max_future_days,
            });
        }

        let fits = availability
            .intervals_on(local_date)
            .iter()
            .any(|i| i.start <= start && end <= i.end);
        if !fits {
            tracing::debug!(id = %request.id, %start, %local_date, "booking rejected: outside availability");
            return Err(SlotError::Unavailable { start, end });
        }

        let bookings = self.blocking_bookings()?;
        let conflicts = find_conflicts(start, end, &bookings, Buffers::from(&event_type));
        if !conflicts.is_empty() {
            let ids: Vec<&str> = conflicts.iter().map(|c| c.booking.id.as_str()).collect();
            tracing::debug!(id = %request.id, conflicts = ?ids, "booking rejected: conflict");
            return Err(SlotError::Conflict {
                count: conflicts.len(),
                ids: ids.join(", "),
            });
        }

        let booking = Booking::new(
            request.id,
            start,
            end,
            BookingStatus::initial(event_type.requires_confirmation),
        );
        self.store.insert_booking(booking.clone())?;
        tracing::info!(id = %booking.id, status = %booking.status, %start, "booking created");
        Ok(booking)
    }

    pub fn confirm(&mut self, booking_id: &str) -> Result<Booking> {
        self.apply(booking_id, Booking::confirm)
    }

    pub fn complete(&mut self, booking_id: &str) -> Result<Booking> {
        self.apply(booking_id, Booking::complete)
    }

    /// Cancel a booking; its time becomes bookable again immediately.
    pub fn cancel(&mut self, booking_id: &str, reason: &str, now: DateTime<Utc>) -> Result<Booking> {
        self.apply(booking_id, |b| b.cancel(reason, now))
    }

    fn apply(&mut self, booking_id: &str, change: impl FnOnce(&mut Booking) -> Result<()>) -> Result<Booking> {
        let mut booking = self.store.booking(booking_id)?;
        change(&mut booking)?;
        self.store.update_booking(booking.clone())?;
        tracing::info!(id = %booking.id, status = %booking.status, "booking updated");
        Ok(booking)
    }
}
