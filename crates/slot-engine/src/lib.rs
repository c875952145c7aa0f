//! # slot-engine
//!
//! Deterministic appointment slot computation for booking pages.
//!
//! Given a host's weekly availability, one-off date overrides, existing
//! bookings, and a meeting type's timing rules, the engine computes which
//! windows on a date can be booked and checks candidate bookings for
//! buffer-aware conflicts. Every function is pure: inputs are caller-supplied
//! snapshots and "now" is always passed in.
//!
//! ## Modules
//!
//! - [`time`] — `HH:MM` parsing/formatting and weekday indexing
//! - [`dst`] — Anchoring wall-clock times to instants across DST transitions
//! - [`resolver`] — Weekly slots + date overrides → effective open intervals
//! - [`slots`] — Open intervals → 15-minute grid of candidate time slots
//! - [`conflict`] — Buffer-expanded overlap detection
//! - [`scan`] — Which dates in a range have open time; scheduling horizon
//! - [`busy`] — Merge external calendar busy periods into the booking list
//! - [`booking`] — Booking status lifecycle
//! - [`store`] / [`scheduler`] — Storage seam and the compare-and-insert booking service
//! - [`snapshot`] — JSON snapshot consumed by the CLI and WASM front ends
//! - [`error`] — Error types

pub mod booking;
pub mod busy;
pub mod conflict;
pub mod dst;
pub mod error;
pub mod model;
pub mod resolver;
pub mod scan;
pub mod scheduler;
pub mod slots;
pub mod snapshot;
pub mod store;
pub mod time;

pub use booking::{Booking, BookingStatus};
pub use conflict::{find_conflicts, has_conflict, Buffers};
pub use error::SlotError;
pub use model::{AvailabilitySlot, DateOverride, EventType, Interval, Schedule, TimeSlot};
pub use resolver::resolve_effective_intervals;
pub use scan::scan_available_dates;
pub use slots::{generate_time_slots, Availability};
pub use time::{day_of_week, format_time_of_day, parse_time_of_day, TimeOfDay};
