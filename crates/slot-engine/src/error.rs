//! Error types for slot-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::booking::BookingStatus;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A time-of-day string was not `HH:MM` with hours 0-23 and minutes 0-59.
    #[error("Invalid time of day '{0}': expected HH:MM")]
    InvalidFormat(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Event-type timing rules the engine refuses to work with.
    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Duplicate booking id: {0}")]
    DuplicateId(String),

    #[error("Cannot move booking from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// The requested window overlaps one or more existing bookings.
    #[error("Requested window conflicts with {count} existing booking(s): {ids}")]
    Conflict { count: usize, ids: String },

    #[error("Start {start} is before the minimum notice threshold {threshold}")]
    TooSoon {
        start: DateTime<Utc>,
        threshold: DateTime<Utc>,
    },

    /// The requested window lies outside every open interval of its date.
    #[error("Window {start} - {end} is outside the host's availability")]
    Unavailable {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Start {start} is beyond the {max_future_days}-day scheduling horizon")]
    BeyondHorizon {
        start: DateTime<Utc>,
        max_future_days: u32,
    },

    #[error("Snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
