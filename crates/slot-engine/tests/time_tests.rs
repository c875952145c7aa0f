//! Tests for time-of-day parsing, formatting, and weekday indexing.

use chrono::NaiveDate;
use slot_engine::{day_of_week, format_time_of_day, parse_time_of_day, SlotError, TimeOfDay};

#[test]
fn parses_zero_padded_times() {
    let t = parse_time_of_day("09:05").unwrap();
    assert_eq!((t.hours(), t.minutes()), (9, 5));

    let t = parse_time_of_day("23:59").unwrap();
    assert_eq!((t.hours(), t.minutes()), (23, 59));

    let t = parse_time_of_day("00:00").unwrap();
    assert_eq!(t.minutes_since_midnight(), 0);
}

#[test]
fn parses_single_digit_fields() {
    let t = parse_time_of_day("9:30").unwrap();
    assert_eq!(format_time_of_day(t), "09:30");
}

#[test]
fn rejects_malformed_strings() {
    for bad in [
        "", "9", "09:", ":30", "24:00", "12:60", "12:30:00", "ab:cd", "-1:30", "+9:30", " 9:30",
        "009:30", "12.30",
    ] {
        let err = parse_time_of_day(bad).unwrap_err();
        assert!(
            matches!(err, SlotError::InvalidFormat(ref s) if s == bad),
            "expected InvalidFormat for {:?}, got {:?}",
            bad,
            err
        );
    }
}

#[test]
fn format_is_inverse_of_parse() {
    for s in ["00:00", "07:45", "12:00", "23:59"] {
        assert_eq!(format_time_of_day(parse_time_of_day(s).unwrap()), s);
    }
}

#[test]
fn times_compare_chronologically() {
    let nine: TimeOfDay = "09:00".parse().unwrap();
    let nine_thirty: TimeOfDay = "09:30".parse().unwrap();
    let ten: TimeOfDay = "10:00".parse().unwrap();

    assert!(nine < nine_thirty);
    assert!(nine_thirty < ten);
    assert_eq!(TimeOfDay::new(9, 0).unwrap(), nine);
}

#[test]
fn new_rejects_out_of_range_components() {
    assert!(TimeOfDay::new(24, 0).is_err());
    assert!(TimeOfDay::new(0, 60).is_err());
}

#[test]
fn serde_uses_hh_mm_strings() {
    let t: TimeOfDay = serde_json::from_str("\"13:15\"").unwrap();
    assert_eq!(t.to_string(), "13:15");
    assert_eq!(serde_json::to_string(&t).unwrap(), "\"13:15\"");
    assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
}

#[test]
fn day_of_week_counts_from_sunday() {
    // 2026-03-15 is a Sunday.
    let sunday = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    let expected = [0u8, 1, 2, 3, 4, 5, 6, 0];

    for (offset, want) in expected.iter().enumerate() {
        let date = sunday + chrono::Days::new(offset as u64);
        assert_eq!(day_of_week(date), *want, "{}", date);
    }
}
