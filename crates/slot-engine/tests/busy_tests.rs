//! Tests for merging external calendar busy periods.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use slot_engine::busy::{merge_busy_periods, with_busy_intervals, BusyInterval};
use slot_engine::model::{AvailabilitySlot, EventType};
use slot_engine::{generate_time_slots, Availability, Booking, BookingStatus};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

fn busy(start: (u32, u32), end: (u32, u32)) -> BusyInterval {
    BusyInterval {
        start: at(start.0, start.1),
        end: at(end.0, end.1),
    }
}

#[test]
fn overlapping_periods_are_coalesced() {
    let merged = merge_busy_periods(&[busy((10, 0), (11, 0)), busy((9, 0), (10, 30))]);

    assert_eq!(merged, vec![busy((9, 0), (11, 0))]);
}

#[test]
fn adjacent_periods_are_coalesced() {
    let merged = merge_busy_periods(&[busy((9, 0), (10, 0)), busy((10, 0), (11, 0))]);

    assert_eq!(merged, vec![busy((9, 0), (11, 0))]);
}

#[test]
fn disjoint_periods_stay_separate_and_sorted() {
    let merged = merge_busy_periods(&[busy((14, 0), (15, 0)), busy((9, 0), (10, 0))]);

    assert_eq!(merged, vec![busy((9, 0), (10, 0)), busy((14, 0), (15, 0))]);
}

#[test]
fn contained_period_is_absorbed() {
    let merged = merge_busy_periods(&[busy((9, 0), (12, 0)), busy((10, 0), (11, 0))]);

    assert_eq!(merged, vec![busy((9, 0), (12, 0))]);
}

#[test]
fn empty_and_inverted_periods_are_dropped() {
    let merged = merge_busy_periods(&[busy((9, 0), (9, 0)), busy((11, 0), (10, 0))]);

    assert!(merged.is_empty());
}

#[test]
fn busy_periods_become_confirmed_bookings() {
    let existing = vec![Booking::new("b1", at(8, 0), at(8, 30), BookingStatus::Pending)];

    let all = with_busy_intervals(&existing, &[busy((14, 0), (15, 0)), busy((9, 0), (10, 0))]);

    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, "b1");
    assert_eq!(all[1].id, "busy-0");
    assert_eq!(all[1].start, at(9, 0));
    assert_eq!(all[2].id, "busy-1");
    assert!(all[1..].iter().all(|b| b.status == BookingStatus::Confirmed));
}

#[test]
fn busy_periods_block_generated_slots() {
    let availability = Availability::new(
        "UTC",
        vec![AvailabilitySlot {
            schedule_id: "default".to_string(),
            day_of_week: 1,
            start_time: "09:00".parse().unwrap(),
            end_time: "11:00".parse().unwrap(),
        }],
        vec![],
    )
    .unwrap();
    let et = EventType {
        id: "e".to_string(),
        schedule_id: "default".to_string(),
        duration_minutes: 30,
        buffer_before_minutes: 0,
        buffer_after_minutes: 0,
        min_notice_minutes: 0,
        max_future_days: 30,
        requires_confirmation: false,
    };
    let bookings = with_busy_intervals(&[], &[busy((10, 0), (10, 30))]);
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();

    let slots = generate_time_slots(date, 30, &availability, &bookings, &et, at(0, 0)).unwrap();

    let unavailable: Vec<_> = slots.iter().filter(|s| !s.available).map(|s| s.start).collect();
    assert_eq!(unavailable, vec![at(9, 45), at(10, 0), at(10, 15)]);
}
