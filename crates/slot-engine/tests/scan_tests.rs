//! Tests for the date-range availability scan and horizon helpers.

use chrono::{NaiveDate, TimeZone, Utc};
use slot_engine::model::{AvailabilitySlot, DateOverride, EventType};
use slot_engine::scan::{horizon_end, scan_bookable_dates, within_horizon};
use slot_engine::{generate_time_slots, scan_available_dates, Availability};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

fn slot(day: u8) -> AvailabilitySlot {
    AvailabilitySlot {
        schedule_id: "default".to_string(),
        day_of_week: day,
        start_time: "09:00".parse().unwrap(),
        end_time: "17:00".parse().unwrap(),
    }
}

fn ovr(d: NaiveDate, is_available: bool, window: Option<(&str, &str)>) -> DateOverride {
    DateOverride {
        date: d,
        is_available,
        start_time: window.map(|(s, _)| s.parse().unwrap()),
        end_time: window.map(|(_, e)| e.parse().unwrap()),
    }
}

/// Monday through Friday, 09:00-17:00.
fn weekdays() -> Vec<AvailabilitySlot> {
    (1..=5).map(slot).collect()
}

#[test]
fn weekdays_in_range_are_listed_in_order() {
    // 2026-03-14 (Sat) .. 2026-03-22 (Sun)
    let dates = scan_available_dates(date(3, 14), date(3, 22), &weekdays(), &[]);

    assert_eq!(
        dates,
        vec![date(3, 16), date(3, 17), date(3, 18), date(3, 19), date(3, 20)]
    );
}

#[test]
fn range_bounds_are_inclusive() {
    let dates = scan_available_dates(date(3, 16), date(3, 16), &weekdays(), &[]);
    assert_eq!(dates, vec![date(3, 16)]);
}

#[test]
fn inverted_range_is_empty() {
    assert!(scan_available_dates(date(3, 20), date(3, 16), &weekdays(), &[]).is_empty());
}

#[test]
fn blocking_override_excludes_a_weekday() {
    let overrides = vec![ovr(date(3, 17), false, None)];

    let dates = scan_available_dates(date(3, 16), date(3, 18), &weekdays(), &overrides);

    assert_eq!(dates, vec![date(3, 16), date(3, 18)]);
}

#[test]
fn available_override_includes_a_weekend_day() {
    let overrides = vec![ovr(date(3, 21), true, Some(("10:00", "12:00")))];

    let dates = scan_available_dates(date(3, 20), date(3, 22), &weekdays(), &overrides);

    assert_eq!(dates, vec![date(3, 20), date(3, 21)]);
}

#[test]
fn available_override_without_times_counts_even_with_no_weekly_slot() {
    let overrides = vec![ovr(date(3, 22), true, None)];

    let dates = scan_available_dates(date(3, 22), date(3, 22), &weekdays(), &overrides);

    assert_eq!(dates, vec![date(3, 22)]);
}

#[test]
fn no_slots_and_no_overrides_yields_nothing() {
    assert!(scan_available_dates(date(3, 1), date(3, 31), &[], &[]).is_empty());
}

#[test]
fn range_spanning_months_and_years() {
    let dates = scan_available_dates(date(12, 30), NaiveDate::from_ymd_opt(2027, 1, 2).unwrap(), &[slot(5)], &[]);

    // 2027-01-01 is a Friday.
    assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()]);
}

#[test]
fn scan_and_generator_disagree_on_empty_override_window() {
    // The scan treats any available override as open; the generator finds no
    // room in a zero-length window.
    let monday = date(3, 16);
    let overrides = vec![ovr(monday, true, Some(("12:00", "12:00")))];

    let dates = scan_available_dates(monday, monday, &weekdays(), &overrides);
    assert_eq!(dates, vec![monday]);

    let availability = Availability::new("UTC", weekdays(), overrides).unwrap();
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
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();
    let slots = generate_time_slots(monday, 30, &availability, &[], &et, now).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn horizon_end_adds_max_future_days() {
    assert_eq!(horizon_end(date(3, 16), 0), date(3, 16));
    assert_eq!(horizon_end(date(3, 16), 30), date(4, 15));
}

#[test]
fn within_horizon_is_inclusive_on_both_ends() {
    let today = date(3, 16);

    assert!(within_horizon(today, today, 7));
    assert!(within_horizon(date(3, 23), today, 7));
    assert!(!within_horizon(date(3, 24), today, 7));
    assert!(!within_horizon(date(3, 15), today, 7));
}

#[test]
fn bookable_dates_stop_at_the_horizon() {
    let et = EventType {
        id: "e".to_string(),
        schedule_id: "default".to_string(),
        duration_minutes: 30,
        buffer_before_minutes: 0,
        buffer_after_minutes: 0,
        min_notice_minutes: 0,
        max_future_days: 7,
        requires_confirmation: false,
    };

    // Monday 03-16 + 7 days = Monday 03-23
    let dates = scan_bookable_dates(date(3, 16), &et, &weekdays(), &[]);

    assert_eq!(dates.len(), 6);
    assert_eq!(dates.first(), Some(&date(3, 16)));
    assert_eq!(dates.last(), Some(&date(3, 23)));
}
