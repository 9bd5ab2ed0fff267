//! Tests for clock, calendar, and thread-id helpers.

use minispdlog::util::{DEFAULT_TIME_FORMAT, epoch_seconds};
use minispdlog::{
    Calendar, CalendarTime, LocalCalendar, UtcCalendar, current_thread_id,
    current_timestamp_millis, format_time,
};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[test]
fn format_time_default_layout() {
    let rendered = format_time(SystemTime::now(), DEFAULT_TIME_FORMAT);
    let bytes = rendered.as_bytes();

    assert_eq!(rendered.len(), 19);
    assert_eq!(bytes[4], b'-');
    assert_eq!(bytes[7], b'-');
    assert_eq!(bytes[10], b' ');
    assert_eq!(bytes[13], b':');
    assert_eq!(bytes[16], b':');
}

#[test]
fn format_time_custom_template() {
    // Mid-November: the year is the same in every time zone
    let time = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    assert_eq!(format_time(time, "%Y"), "2023");
    assert_eq!(format_time(time, "year %Y!"), "year 2023!");
}

#[test]
fn timestamp_millis_tracks_wall_clock() {
    let expected = i64::try_from(
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis(),
    )
    .unwrap();
    let actual = current_timestamp_millis();
    assert!((actual - expected).abs() < 5_000);
}

#[test]
fn thread_id_is_stable_per_thread() {
    assert_eq!(current_thread_id(), current_thread_id());
}

#[test]
fn thread_ids_differ_across_threads() {
    let here = current_thread_id();
    let there = thread::spawn(current_thread_id).join().unwrap();
    assert_ne!(here, there);
}

#[test]
fn epoch_seconds_truncates() {
    assert_eq!(epoch_seconds(UNIX_EPOCH + Duration::from_millis(1_999)), 1);
    assert_eq!(epoch_seconds(UNIX_EPOCH), 0);
}

#[test]
fn epoch_seconds_floors_before_epoch() {
    assert_eq!(epoch_seconds(UNIX_EPOCH - Duration::from_millis(1_500)), -2);
    assert_eq!(epoch_seconds(UNIX_EPOCH - Duration::from_secs(1)), -1);
}

#[test]
fn utc_calendar_decomposes() {
    assert_eq!(
        UtcCalendar.decompose(1_700_000_000),
        CalendarTime {
            year: 2023,
            month: 11,
            day: 14,
            hour: 22,
            minute: 13,
            second: 20,
        }
    );
    assert_eq!(UtcCalendar.decompose(-2).year, 1969);
}

#[test]
fn local_calendar_keeps_fields_in_range() {
    let time = LocalCalendar.decompose(1_700_000_000);
    assert!((1..=12).contains(&time.month));
    assert!((1..=31).contains(&time.day));
    assert!(time.hour < 24);
    assert!(time.minute < 60);
    assert!(time.second < 61);
}
