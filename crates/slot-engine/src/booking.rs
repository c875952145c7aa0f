//! Bookings and their status lifecycle.
//!
//! A booking starts out `Pending` or `Confirmed` depending on the event type,
//! may be confirmed, completed, or cancelled, and once cancelled no longer
//! occupies time.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Status a freshly created booking starts in.
    pub fn initial(requires_confirmation: bool) -> Self {
        if requires_confirmation {
            Self::Pending
        } else {
            Self::Confirmed
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Whether a booking in this status occupies its time range.
    pub fn blocks_time(self) -> bool {
        self != Self::Cancelled
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// An existing appointment on the host's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn new(
        id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: BookingStatus,
    ) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            status,
            cancellation_reason: None,
            cancelled_at: None,
        }
    }

    /// Move a pending booking to confirmed.
    ///
    /// # Errors
    /// `SlotError::InvalidTransition` unless the booking is pending.
    pub fn confirm(&mut self) -> Result<()> {
        self.transition(BookingStatus::Confirmed, &[BookingStatus::Pending])
    }

    /// Cancel a pending or confirmed booking, recording why and when.
    ///
    /// # Errors
    /// `SlotError::InvalidTransition` if the booking is already cancelled or
    /// completed.
    pub fn cancel(&mut self, reason: impl Into<String>, at: DateTime<Utc>) -> Result<()> {
        self.transition(
            BookingStatus::Cancelled,
            &[BookingStatus::Pending, BookingStatus::Confirmed],
        )?;
        self.cancellation_reason = Some(reason.into());
        self.cancelled_at = Some(at);
        Ok(())
    }

    /// Mark a confirmed booking as having taken place.
    ///
    /// # Errors
    /// `SlotError::InvalidTransition` unless the booking is confirmed.
    pub fn complete(&mut self) -> Result<()> {
        self.transition(BookingStatus::Completed, &[BookingStatus::Confirmed])
    }

    fn transition(&mut self, to: BookingStatus, allowed_from: &[BookingStatus]) -> Result<()> {
        if !allowed_from.contains(&self.status) {
            return Err(SlotError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}
