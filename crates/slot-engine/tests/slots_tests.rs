//! Scenario tests for slot generation against a Mon–Fri 09:00–17:00 schedule.
//!
//! "Now" is pinned to Monday 2025-01-06 08:00 throughout.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use slot_engine::{
    available_dates, generate_available_slots, group_slots_by_date, AvailableSlot, BookingStatus,
    DateOverride, ExistingBooking, ScheduleConfig, SlotWindow, TimeRange, WeeklyHours,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn now() -> NaiveDateTime {
    dt("2025-01-06T08:00")
}

fn range(start: &str, end: &str) -> TimeRange {
    TimeRange::parse(start, end).unwrap()
}

fn weekday_config(max_advance: i64) -> ScheduleConfig {
    let mut config = ScheduleConfig::new(30);
    config.max_advance = max_advance;
    config.weekly_hours = (1..=5)
        .map(|day| WeeklyHours {
            day_of_week: day,
            is_enabled: true,
            time_slots: vec![range("09:00", "17:00")],
        })
        .collect();
    config
}

fn booking(start: &str, end: &str, status: BookingStatus) -> ExistingBooking {
    ExistingBooking::new(dt(start), dt(end), status)
}

fn day_window(day: &str) -> SlotWindow {
    let start = date(day).and_hms_opt(0, 0, 0).unwrap();
    SlotWindow::new(Some(start), Some(start + Duration::days(1)))
}

fn starting_at<'a>(slots: &'a [AvailableSlot], at: &str) -> Vec<&'a AvailableSlot> {
    slots.iter().filter(|s| s.start == dt(at)).collect()
}

// ── Weekly hours ────────────────────────────────────────────────────────────

#[test]
fn enabled_weekday_produces_full_grid() {
    let slots =
        generate_available_slots(&weekday_config(1), &[], 30, SlotWindow::default(), now())
            .unwrap();

    assert_eq!(slots.len(), 16, "(17:00 - 09:00) / 30 min = 16 slots");
    for slot in &slots {
        assert_eq!(slot.end - slot.start, Duration::minutes(30));
        assert_eq!(slot.available, 1);
        assert_eq!(slot.total, 1);
    }
}

#[test]
fn disabled_weekday_produces_nothing() {
    let mut config = weekday_config(7);
    config.weekly_hours = vec![WeeklyHours {
        day_of_week: 0,
        is_enabled: false,
        time_slots: vec![],
    }];

    let window = SlotWindow::new(Some(dt("2025-01-12T00:00")), Some(dt("2025-01-12T23:59")));
    let slots = generate_available_slots(&config, &[], 30, window, now()).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn empty_schedule_produces_nothing() {
    let mut config = weekday_config(30);
    config.weekly_hours.clear();
    config.date_overrides.clear();

    let slots = generate_available_slots(&config, &[], 30, SlotWindow::default(), now()).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn split_day_ranges_are_both_used() {
    let mut config = weekday_config(1);
    config.weekly_hours[0].time_slots = vec![range("09:00", "10:00"), range("14:00", "15:00")];

    let slots = generate_available_slots(&config, &[], 30, SlotWindow::default(), now()).unwrap();
    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![
            dt("2025-01-06T09:00"),
            dt("2025-01-06T09:30"),
            dt("2025-01-06T14:00"),
            dt("2025-01-06T14:30"),
        ]
    );
}

#[test]
fn multi_day_window_is_chronological() {
    let slots =
        generate_available_slots(&weekday_config(7), &[], 60, SlotWindow::default(), now())
            .unwrap();

    // Mon..Fri open, Sat/Sun closed; 60-min appointments on a 30-min grid
    // give 15 starts per day (09:00..16:00).
    assert_eq!(slots.len(), 5 * 15);
    assert!(slots.windows(2).all(|w| w[0].start < w[1].start));
    assert_eq!(
        available_dates(&slots),
        vec!["2025-01-06", "2025-01-07", "2025-01-08", "2025-01-09", "2025-01-10"]
    );
}

// ── Bookings and capacity ───────────────────────────────────────────────────

#[test]
fn confirmed_booking_removes_overlapping_slot() {
    let bookings = vec![booking(
        "2025-01-06T10:00",
        "2025-01-06T10:30",
        BookingStatus::Confirmed,
    )];
    let slots =
        generate_available_slots(&weekday_config(1), &bookings, 30, SlotWindow::default(), now())
            .unwrap();

    assert!(starting_at(&slots, "2025-01-06T10:00").is_empty());
    assert_eq!(slots.len(), 15, "every other slot remains");
}

#[test]
fn cancelled_booking_is_ignored() {
    let bookings = vec![booking(
        "2025-01-06T10:00",
        "2025-01-06T10:30",
        BookingStatus::Cancelled,
    )];
    let slots =
        generate_available_slots(&weekday_config(1), &bookings, 30, SlotWindow::default(), now())
            .unwrap();

    assert_eq!(starting_at(&slots, "2025-01-06T10:00").len(), 1);
    assert_eq!(slots.len(), 16);
}

#[test]
fn pending_booking_holds_capacity() {
    let bookings = vec![booking(
        "2025-01-06T10:00",
        "2025-01-06T10:30",
        BookingStatus::Pending,
    )];
    let slots =
        generate_available_slots(&weekday_config(1), &bookings, 30, SlotWindow::default(), now())
            .unwrap();

    assert!(starting_at(&slots, "2025-01-06T10:00").is_empty());
}

#[test]
fn higher_capacity_keeps_slot_with_remaining_seats() {
    let mut config = weekday_config(1);
    config.max_capacity = 3;
    let bookings = vec![booking(
        "2025-01-06T10:00",
        "2025-01-06T10:30",
        BookingStatus::Confirmed,
    )];
    let slots =
        generate_available_slots(&config, &bookings, 30, SlotWindow::default(), now()).unwrap();

    let at_ten = starting_at(&slots, "2025-01-06T10:00");
    assert_eq!(at_ten.len(), 1);
    assert_eq!(at_ten[0].available, 2);
    assert_eq!(at_ten[0].total, 3);
}

#[test]
fn long_appointment_blocked_by_later_booking() {
    // A 60-min appointment at 09:30 runs into a booking at 10:00
    let bookings = vec![booking(
        "2025-01-06T10:00",
        "2025-01-06T10:30",
        BookingStatus::Confirmed,
    )];
    let slots =
        generate_available_slots(&weekday_config(1), &bookings, 60, SlotWindow::default(), now())
            .unwrap();

    assert!(starting_at(&slots, "2025-01-06T09:30").is_empty());
    assert!(starting_at(&slots, "2025-01-06T10:00").is_empty());
    assert_eq!(starting_at(&slots, "2025-01-06T09:00").len(), 1);
    assert_eq!(starting_at(&slots, "2025-01-06T10:30").len(), 1);
}

// ── Buffers and notice ──────────────────────────────────────────────────────

#[test]
fn buffer_after_limits_last_slot() {
    let mut config = weekday_config(1);
    config.buffer_after = 10;
    config.weekly_hours = vec![WeeklyHours {
        day_of_week: 1,
        is_enabled: true,
        time_slots: vec![range("09:00", "10:00")],
    }];

    let slots = generate_available_slots(&config, &[], 30, SlotWindow::default(), now()).unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start, dt("2025-01-06T09:00"));
    assert_eq!(slots[0].end, dt("2025-01-06T09:30"));
}

#[test]
fn min_notice_excludes_early_slots() {
    let mut config = weekday_config(1);
    config.min_notice = 120;
    config.weekly_hours[0].time_slots = vec![range("09:00", "12:00")];

    let slots = generate_available_slots(&config, &[], 30, SlotWindow::default(), now()).unwrap();
    assert!(!slots.is_empty());
    for slot in &slots {
        assert!(slot.start >= dt("2025-01-06T10:00"));
    }
}

#[test]
fn max_advance_bounds_the_window() {
    let slots =
        generate_available_slots(&weekday_config(2), &[], 30, SlotWindow::default(), now())
            .unwrap();
    let limit = dt("2025-01-08T00:00");
    assert!(slots.iter().all(|s| s.start < limit));
    assert_eq!(available_dates(&slots), vec!["2025-01-06", "2025-01-07"]);
}

// ── Date overrides ──────────────────────────────────────────────────────────

#[test]
fn unavailable_override_closes_date() {
    let mut config = weekday_config(7);
    config.date_overrides = vec![DateOverride::unavailable(date("2025-01-07"))];

    let slots =
        generate_available_slots(&config, &[], 30, day_window("2025-01-07"), now()).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn available_override_replaces_hours() {
    let mut config = weekday_config(7);
    config.date_overrides = vec![DateOverride::available(
        date("2025-01-07"),
        range("10:00", "12:00"),
    )];

    let slots =
        generate_available_slots(&config, &[], 30, day_window("2025-01-07"), now()).unwrap();
    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![
            dt("2025-01-07T10:00"),
            dt("2025-01-07T10:30"),
            dt("2025-01-07T11:00"),
            dt("2025-01-07T11:30"),
        ]
    );
}

#[test]
fn override_does_not_leak_to_other_dates() {
    let mut config = weekday_config(7);
    config.date_overrides = vec![DateOverride::unavailable(date("2025-01-07"))];

    let slots =
        generate_available_slots(&config, &[], 30, day_window("2025-01-08"), now()).unwrap();
    assert_eq!(slots.len(), 16);
}

// ── Grouping ────────────────────────────────────────────────────────────────

#[test]
fn grouping_round_trips_generator_output() {
    let slots =
        generate_available_slots(&weekday_config(7), &[], 30, SlotWindow::default(), now())
            .unwrap();

    let grouped = group_slots_by_date(&slots);
    assert_eq!(grouped.len(), 5);

    let mut flattened: Vec<AvailableSlot> = grouped.into_values().flatten().collect();
    flattened.sort_by_key(|s| s.start);
    assert_eq!(flattened, slots);
}
