use chrono::{Datelike, Timelike};

use temporal_tree::binning::{next_boundary, next_day, next_month, next_year};
use temporal_tree::core::{parse_zone, zoned_from_millis, TimeField, TimeUnit, ZonedTime};

// Chatham 03:30 +13:45, offset drops to +12:45 at 03:45.
const CHATHAM_FALL_BACK: i64 = 1_712_411_100_000;
// Chatham 02:30 +12:45, offset jumps to +13:45 at 02:45.
const CHATHAM_SPRING_FORWARD: i64 = 1_727_531_100_000;
// New York 01:45 EST, clocks jump to 03:00 EDT.
const EASTERN_SPRING_FORWARD: i64 = 1_710_053_100_000;
// New York 01:45 EDT, clocks fall back to 01:00 EST.
const EASTERN_FALL_BACK: i64 = 1_730_612_700_000;

/// (zone, instant 15 minutes before the shift, expected hour delta)
const SHIFTS: [(&str, i64, i32); 4] = [
    ("Pacific/Chatham", CHATHAM_FALL_BACK, -1),
    ("Pacific/Chatham", CHATHAM_SPRING_FORWARD, 1),
    ("US/Eastern", EASTERN_SPRING_FORWARD, 2),
    ("US/Eastern", EASTERN_FALL_BACK, 0),
];

fn at(epoch_ms: i64, zone: &str) -> ZonedTime {
    zoned_from_millis(epoch_ms, parse_zone(zone).expect("zone")).expect("in range")
}

fn hour_delta(from: &ZonedTime, to: &ZonedTime) -> i32 {
    to.hour() as i32 - from.hour() as i32
}

#[test]
fn hour_boundary_follows_offset_shift() {
    for (zone, ms, delta) in SHIFTS {
        let t = at(ms, zone);
        let next = next_boundary(TimeUnit::Hours, TimeField::HourOfDay, &t).expect("next hour");
        assert_eq!(hour_delta(&t, &next), delta, "{zone} at {ms}");
        assert_eq!(next.timestamp_millis(), ms + 15 * 60_000, "{zone} at {ms}");
    }
}

#[test]
fn minute_boundary_follows_offset_shift() {
    for (zone, ms, delta) in SHIFTS {
        let t = at(ms + 14 * 60_000, zone);
        let next =
            next_boundary(TimeUnit::Minutes, TimeField::MinuteOfHour, &t).expect("next minute");
        assert_eq!(hour_delta(&t, &next), delta, "{zone} at {ms}");
        assert_eq!(next.minute(), (t.minute() + 1) % 60, "{zone} at {ms}");
    }
}

#[test]
fn second_boundary_follows_offset_shift() {
    for (zone, ms, delta) in SHIFTS {
        let t = at(ms + 14 * 60_000 + 59_000, zone);
        // sub-day units compare their own field whatever the caller passes
        let next =
            next_boundary(TimeUnit::Seconds, TimeField::SecondOfDay, &t).expect("next second");
        assert_eq!(hour_delta(&t, &next), delta, "{zone} at {ms}");
        assert_eq!(next.minute(), (t.minute() + 1) % 60, "{zone} at {ms}");
        assert_eq!(next.second(), (t.second() + 1) % 60, "{zone} at {ms}");
    }
}

#[test]
fn millisecond_boundary_follows_offset_shift() {
    for (zone, ms, delta) in SHIFTS {
        let t = at(ms + 14 * 60_000 + 59_999, zone);
        let next = next_boundary(TimeUnit::Millis, TimeField::MilliOfSecond, &t).expect("next ms");
        assert_eq!(hour_delta(&t, &next), delta, "{zone} at {ms}");
        assert_eq!(next.minute(), (t.minute() + 1) % 60, "{zone} at {ms}");
        assert_eq!(next.second(), (t.second() + 1) % 60, "{zone} at {ms}");
        assert_eq!(
            TimeField::MilliOfSecond.value_of(&next),
            (TimeField::MilliOfSecond.value_of(&t) + 1) % 1000,
            "{zone} at {ms}"
        );
    }
}

#[test]
fn hour_boundary_outside_shift_is_next_whole_hour() {
    // 2024-05-30T13:00Z
    let t = at(1_717_074_000_000, "Z");
    let next = next_boundary(TimeUnit::Hours, TimeField::HourOfDay, &t).expect("next hour");
    assert_eq!(next.timestamp_millis(), 1_717_077_600_000);
}

#[test]
fn calendar_boundaries_in_utc() {
    // 2024-12-31T23:59:59.999Z
    let t = at(1_735_689_599_999, "Z");
    let day = next_day(&t).expect("next day");
    let month = next_month(&t).expect("next month");
    let year = next_year(&t).expect("next year");
    for next in [day, month, year] {
        assert_eq!((next.year(), next.month(), next.day()), (2025, 1, 1));
        assert_eq!(next.timestamp_millis(), 1_735_689_600_000);
    }
}

#[test]
fn day_boundary_on_fall_back_day_is_25_hours() {
    // 2024-11-03T12:00Z, midday on the fall-back day in New York.
    let t = at(1_730_635_200_000, "America/New_York");
    let start = temporal_tree::core::truncate(&t, TimeUnit::Days).expect("truncate");
    let end = next_day(&t).expect("next day");
    assert_eq!(start.hour(), 0);
    assert_eq!(end.hour(), 0);
    assert_eq!(
        end.timestamp_millis() - start.timestamp_millis(),
        25 * 3_600_000
    );
}

#[test]
fn month_boundary_in_eastern_keeps_local_midnight() {
    // 2024-03-15T12:00Z; March 2024 in New York spans the spring-forward shift.
    let t = at(1_710_504_000_000, "America/New_York");
    let next = next_month(&t).expect("next month");
    assert_eq!((next.month(), next.day(), next.hour()), (4, 1, 0));
    // 2024-04-01T04:00Z
    assert_eq!(next.timestamp_millis(), 1_711_944_000_000);
}
