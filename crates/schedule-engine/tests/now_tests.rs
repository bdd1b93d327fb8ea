//! Tests for the current-time indicator.

use chrono::{NaiveDate, NaiveTime};
use schedule_engine::now::{now_fraction, REFRESH_INTERVAL};
use schedule_engine::{now_offset, LayoutConfig};

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn offset_inside_window() {
    assert_eq!(now_offset(&at(9, 30), 6, 22), Some(3 * 60 + 30));
}

#[test]
fn window_start_is_zero() {
    assert_eq!(now_offset(&at(6, 0), 6, 22), Some(0));
}

#[test]
fn last_visible_hour_is_shown() {
    assert_eq!(now_offset(&at(22, 59), 6, 22), Some(16 * 60 + 59));
}

#[test]
fn outside_window_is_not_visible() {
    assert_eq!(now_offset(&at(5, 59), 6, 22), None);
    assert_eq!(now_offset(&at(23, 0), 6, 22), None);
}

#[test]
fn seconds_are_ignored() {
    let t = NaiveTime::from_hms_opt(10, 15, 59).unwrap();
    assert_eq!(now_offset(&t, 10, 12), Some(15));
}

#[test]
fn accepts_full_datetimes() {
    let now = NaiveDate::from_ymd_opt(2024, 1, 10)
        .unwrap()
        .and_hms_opt(14, 5, 0)
        .unwrap();
    assert_eq!(now_offset(&now, 8, 18), Some(6 * 60 + 5));
}

#[test]
fn fraction_is_none_outside_window() {
    let config = LayoutConfig::with_hours(9, 17);
    assert_eq!(now_fraction(&at(7, 0), &config), None);
    assert_eq!(now_fraction(&at(9, 0), &config), Some(0.0));
}

#[test]
fn refresh_is_once_a_minute() {
    assert_eq!(REFRESH_INTERVAL.as_secs(), 60);
}
