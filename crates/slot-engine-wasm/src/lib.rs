//! WASM bindings for slot-engine.
//!
//! Exposes interval resolution, slot generation, conflict checks, and date
//! scans to the booking page via `wasm-bindgen`. All complex types are passed
//! as JSON strings; availability inputs use the `slot_engine::snapshot::Snapshot`
//! document shape.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use slot_engine::dst::DstPolicy;
use slot_engine::model::{Interval, TimeSlot};
use slot_engine::snapshot::Snapshot;
use slot_engine::Booking;
use wasm_bindgen::prelude::*;

/// Timezone used when a snapshot does not name one.
const DEFAULT_TIMEZONE: &str = "UTC";

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct IntervalDto {
    start: String,
    end: String,
}

impl From<&Interval> for IntervalDto {
    fn from(i: &Interval) -> Self {
        Self {
            start: i.start.to_rfc3339(),
            end: i.end.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
struct TimeSlotDto {
    start: String,
    end: String,
    available: bool,
}

impl From<&TimeSlot> for TimeSlotDto {
    fn from(s: &TimeSlot) -> Self {
        Self {
            start: s.start.to_rfc3339(),
            end: s.end.to_rfc3339(),
            available: s.available,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers: parse inputs, keeping errors as plain strings so they can be
// exercised off-wasm
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset, e.g., "2026-03-16T14:00:00+00:00")
/// and naive local time (e.g., "2026-03-16T14:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn parse_snapshot(json: &str) -> Result<Snapshot, String> {
    Snapshot::from_json(json).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn resolve_json(date: &str, snapshot_json: &str) -> Result<String, String> {
    let date = parse_date(date)?;
    let snapshot = parse_snapshot(snapshot_json)?;
    let availability = snapshot
        .availability(DEFAULT_TIMEZONE, DstPolicy::default())
        .map_err(|e| e.to_string())?;

    let dtos: Vec<IntervalDto> = availability.intervals_on(date).iter().map(IntervalDto::from).collect();
    to_json(&dtos)
}

fn generate_json(date: &str, duration_minutes: u32, snapshot_json: &str, now: &str) -> Result<String, String> {
    let date = parse_date(date)?;
    let now = parse_datetime(now)?;
    let snapshot = parse_snapshot(snapshot_json)?;
    let availability = snapshot
        .availability(DEFAULT_TIMEZONE, DstPolicy::default())
        .map_err(|e| e.to_string())?;
    let event_type = snapshot.event_type().map_err(|e| e.to_string())?;

    let slots = slot_engine::generate_time_slots(
        date,
        duration_minutes,
        &availability,
        &snapshot.blocking_bookings(),
        event_type,
        now,
    )
    .map_err(|e| e.to_string())?;

    let dtos: Vec<TimeSlotDto> = slots.iter().map(TimeSlotDto::from).collect();
    to_json(&dtos)
}

fn conflict_check(
    start: &str,
    end: &str,
    bookings_json: &str,
    buffer_before_minutes: u32,
    buffer_after_minutes: u32,
) -> Result<bool, String> {
    let start = parse_datetime(start)?;
    let end = parse_datetime(end)?;
    let bookings: Vec<Booking> =
        serde_json::from_str(bookings_json).map_err(|e| format!("Invalid bookings JSON: {}", e))?;

    Ok(slot_engine::has_conflict(
        start,
        end,
        &bookings,
        buffer_before_minutes,
        buffer_after_minutes,
    ))
}

fn scan_json(start: &str, end: &str, snapshot_json: &str) -> Result<String, String> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let snapshot = parse_snapshot(snapshot_json)?;

    let dates: Vec<String> =
        slot_engine::scan_available_dates(start, end, &snapshot.slots, &snapshot.overrides)
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();
    to_json(&dates)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Effective open intervals for `date` (`YYYY-MM-DD`).
///
/// Returns a JSON array of `{start, end}` objects with RFC 3339 strings.
#[wasm_bindgen(js_name = "resolveEffectiveIntervals")]
pub fn resolve_effective_intervals(date: &str, snapshot_json: &str) -> Result<String, JsValue> {
    resolve_json(date, snapshot_json).map_err(|e| JsValue::from_str(&e))
}

/// Candidate time slots for `date`.
///
/// `snapshot_json` must carry an `event_type`; its external `busy` periods are
/// treated as confirmed bookings. `now` is an ISO 8601 datetime. Returns a JSON
/// array of `{start, end, available}` objects.
#[wasm_bindgen(js_name = "generateTimeSlots")]
pub fn generate_time_slots(
    date: &str,
    duration_minutes: u32,
    snapshot_json: &str,
    now: &str,
) -> Result<String, JsValue> {
    generate_json(date, duration_minutes, snapshot_json, now).map_err(|e| JsValue::from_str(&e))
}

/// Whether `[start, end)` conflicts with any non-cancelled booking widened by
/// the given buffers. `bookings_json` is a JSON array of bookings.
#[wasm_bindgen(js_name = "hasConflict")]
pub fn has_conflict(
    start: &str,
    end: &str,
    bookings_json: &str,
    buffer_before_minutes: u32,
    buffer_after_minutes: u32,
) -> Result<bool, JsValue> {
    conflict_check(start, end, bookings_json, buffer_before_minutes, buffer_after_minutes)
        .map_err(|e| JsValue::from_str(&e))
}

/// Dates between `start` and `end` (inclusive, `YYYY-MM-DD`) with open time.
///
/// Returns a JSON array of `YYYY-MM-DD` strings.
#[wasm_bindgen(js_name = "scanAvailableDates")]
pub fn scan_available_dates(start: &str, end: &str, snapshot_json: &str) -> Result<String, JsValue> {
    scan_json(start, end, snapshot_json).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "timezone": "UTC",
        "slots": [{ "day_of_week": 1, "start_time": "09:00", "end_time": "10:00" }],
        "overrides": [{ "date": "2026-03-23", "is_available": false }],
        "bookings": [{
            "id": "b1",
            "start": "2026-03-16T09:30:00Z",
            "end": "2026-03-16T10:00:00Z",
            "status": "confirmed"
        }],
        "event_type": {
            "duration_minutes": 30,
            "buffer_before_minutes": 0,
            "buffer_after_minutes": 0,
            "min_notice_minutes": 0,
            "max_future_days": 30
        }
    }"#;

    #[test]
    fn resolve_returns_rfc3339_intervals() {
        let json = resolve_json("2026-03-16", SNAPSHOT).unwrap();
        assert_eq!(
            json,
            r#"[{"start":"2026-03-16T09:00:00+00:00","end":"2026-03-16T10:00:00+00:00"}]"#
        );
    }

    #[test]
    fn generate_flags_booked_candidates() {
        let json = generate_json("2026-03-16", 30, SNAPSHOT, "2026-03-16T00:00:00Z").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let flags: Vec<bool> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["available"].as_bool().unwrap())
            .collect();

        // 09:00 free, 09:15 and 09:30 overlap 09:30-10:00
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn generate_accepts_naive_now() {
        assert!(generate_json("2026-03-16", 30, SNAPSHOT, "2026-03-16T00:00:00").is_ok());
    }

    #[test]
    fn conflict_check_uses_buffers() {
        let bookings = r#"[{"id":"b","start":"2026-03-16T10:30:00Z","end":"2026-03-16T11:00:00Z","status":"confirmed"}]"#;

        assert!(!conflict_check("2026-03-16T10:00:00Z", "2026-03-16T10:30:00Z", bookings, 0, 0).unwrap());
        assert!(conflict_check("2026-03-16T10:00:00Z", "2026-03-16T10:30:00Z", bookings, 30, 0).unwrap());
    }

    #[test]
    fn scan_skips_blocked_dates() {
        let json = scan_json("2026-03-16", "2026-03-30", SNAPSHOT).unwrap();
        assert_eq!(json, r#"["2026-03-16","2026-03-30"]"#);
    }

    #[test]
    fn bad_inputs_surface_readable_errors() {
        assert!(parse_date("16/03/2026").unwrap_err().contains("Invalid date"));
        assert!(parse_datetime("yesterday").unwrap_err().contains("Invalid datetime"));
        assert!(conflict_check("2026-03-16T10:00:00Z", "2026-03-16T10:30:00Z", "{", 0, 0).is_err());
        let bad_time = r#"{"slots":[{"day_of_week":1,"start_time":"9am","end_time":"10:00"}]}"#;
        assert!(resolve_json("2026-03-16", bad_time).is_err());
    }
}
