//! Tests for the availability search.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use slot_engine::{find_first_slot, find_slots, BusyInterval, SearchWindow, SlotError};

/// Helper to build a UTC instant on a March 2026 day.
fn at(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, min, 0).unwrap()
}

fn busy(start: DateTime<Utc>, end: DateTime<Utc>) -> BusyInterval {
    BusyInterval::new(start, end)
}

/// Window over `[2026-03-start_day, 2026-03-end_day)` with default business hours.
fn window(start_day: u32, end_day: u32, duration: i64) -> SearchWindow {
    SearchWindow::new(
        NaiveDate::from_ymd_opt(2026, 3, start_day).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, end_day).unwrap(),
        duration,
    )
}

#[test]
fn empty_busy_two_days_yields_34_slots() {
    let slots = find_slots(&[], &window(2, 4, 60)).unwrap();

    // 2 × ((18 - 9) * 60 - 60) / 30 + 1 = 2 × 17
    assert_eq!(slots.len(), 34);
    assert_eq!(slots[0].start, at(2, 9, 0));
    assert_eq!(slots[16].start, at(2, 17, 0));
    assert_eq!(slots[16].end, at(2, 18, 0));
    assert_eq!(slots[17].start, at(3, 9, 0));
    assert_eq!(slots[33].end, at(3, 18, 0));

    for pair in slots[..17].windows(2) {
        assert_eq!(pair[1].start - pair[0].start, Duration::minutes(30));
    }
    assert!(slots.iter().all(|s| s.duration_minutes == 60));
}

#[test]
fn slot_touching_busy_end_is_available() {
    let busy = vec![busy(at(2, 9, 0), at(2, 10, 0))];

    let slots = find_slots(&busy, &window(2, 3, 60)).unwrap();

    // 09:00 and 09:30 overlap; 10:00-11:00 only touches the busy end.
    assert_eq!(slots.len(), 15);
    assert_eq!(slots[0].start, at(2, 10, 0));
    assert_eq!(slots[0].end, at(2, 11, 0));
}

#[test]
fn slot_touching_busy_start_is_available() {
    let busy = vec![busy(at(2, 12, 0), at(2, 13, 0))];

    let slots = find_slots(&busy, &window(2, 3, 60)).unwrap();

    assert!(slots.iter().any(|s| s.start == at(2, 11, 0) && s.end == at(2, 12, 0)));
    assert!(!slots.iter().any(|s| s.start == at(2, 11, 30)));
    assert!(slots.iter().any(|s| s.start == at(2, 13, 0)));
}

#[test]
fn full_day_block_leaves_adjacent_days_untouched() {
    let busy = vec![busy(at(3, 9, 0), at(3, 18, 0))];

    let slots = find_slots(&busy, &window(2, 5, 60)).unwrap();

    assert_eq!(slots.len(), 34);
    assert!(slots.iter().all(|s| s.start.day() != 3));
    assert_eq!(slots[16].start, at(2, 17, 0));
    assert_eq!(slots[17].start, at(4, 9, 0));
}

#[test]
fn busy_spanning_midnight_blocks_both_days() {
    let busy = vec![busy(at(2, 17, 0), at(3, 10, 0))];

    let slots = find_slots(&busy, &window(2, 4, 60)).unwrap();

    // Day 1 loses 16:30 and 17:00; day 2 loses 09:00 and 09:30.
    assert_eq!(slots.len(), 30);
    assert_eq!(slots[14].start, at(2, 16, 0));
    assert_eq!(slots[15].start, at(3, 10, 0));
}

#[test]
fn busy_outside_business_hours_is_ignored() {
    let busy = vec![
        busy(at(2, 6, 0), at(2, 9, 0)),
        busy(at(2, 18, 0), at(2, 22, 0)),
        busy(at(1, 9, 0), at(1, 18, 0)),
    ];

    let slots = find_slots(&busy, &window(2, 3, 60)).unwrap();

    assert_eq!(slots.len(), 17);
}

#[test]
fn overlapping_busy_intervals_need_no_merging() {
    let busy = vec![
        busy(at(2, 10, 30), at(2, 12, 0)),
        busy(at(2, 10, 0), at(2, 11, 0)),
    ];

    let slots = find_slots(&busy, &window(2, 3, 60)).unwrap();

    // Starts 09:30 through 11:30 are rejected.
    assert_eq!(slots.len(), 12);
    assert_eq!(slots[0].start, at(2, 9, 0));
    assert_eq!(slots[1].start, at(2, 12, 0));
}

#[test]
fn duration_longer_than_business_day_yields_nothing() {
    let slots = find_slots(&[], &window(2, 4, 600)).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn unrepresentable_duration_yields_nothing() {
    assert!(find_slots(&[], &window(2, 4, i64::MAX)).unwrap().is_empty());
    assert!(find_slots(&[], &window(2, 4, 1_000_000_000_000)).unwrap().is_empty());
    assert!(find_slots(&[], &window(2, 4, 24 * 60 + 1)).unwrap().is_empty());
}

#[test]
fn step_longer_than_business_day_keeps_opening_slot_only() {
    for step in [24 * 60, 1_000_000_000_000, i64::MAX] {
        let slots = find_slots(&[], &window(2, 4, 60).with_step(step)).unwrap();

        let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![at(2, 9, 0), at(3, 9, 0)], "step {}", step);
    }
}

#[test]
fn slots_never_cross_closing_time() {
    let slots = find_slots(&[], &window(2, 3, 45)).unwrap();

    let last = slots.last().unwrap();
    assert_eq!(last.start, at(2, 17, 0));
    assert_eq!(last.end, at(2, 17, 45));
    assert!(slots.iter().all(|s| s.end <= at(2, 18, 0)));
}

#[test]
fn step_is_independent_of_duration() {
    let w = window(2, 3, 30).with_step(60);

    let slots = find_slots(&[], &w).unwrap();

    // 09:00 .. 17:00 on the hour
    assert_eq!(slots.len(), 9);
    assert_eq!(slots[8].start, at(2, 17, 0));
    assert_eq!(slots[8].end, at(2, 17, 30));
}

#[test]
fn custom_business_hours() {
    let w = window(2, 3, 60).with_business_hours(13, 15);

    let slots = find_slots(&[], &w).unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![at(2, 13, 0), at(2, 13, 30), at(2, 14, 0)]);
}

#[test]
fn business_hours_follow_window_timezone() {
    let w = window(2, 3, 60).with_timezone(chrono_tz::Asia::Tokyo);

    let slots = find_slots(&[], &w).unwrap();

    // 09:00 JST is 00:00 UTC; 18:00 JST is 09:00 UTC.
    assert_eq!(slots.len(), 17);
    assert_eq!(slots[0].start, at(2, 0, 0));
    assert_eq!(slots[16].end, at(2, 9, 0));
}

#[test]
fn spring_forward_day_shortens_business_hours() {
    // New York springs forward at 02:00 on 2026-03-08.
    // 01:00 EST = 06:00 UTC, 04:00 EDT = 08:00 UTC: two real hours.
    let w = SearchWindow::new(
        NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
        60,
    )
    .with_business_hours(1, 4)
    .with_timezone(chrono_tz::America::New_York);

    let slots = find_slots(&[], &w).unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![at(8, 6, 0), at(8, 6, 30), at(8, 7, 0)]);
}

#[test]
fn results_are_chronological_day_major() {
    let busy = vec![busy(at(3, 11, 0), at(3, 14, 0))];

    let slots = find_slots(&busy, &window(2, 6, 90)).unwrap();

    for pair in slots.windows(2) {
        assert!(pair[0].start < pair[1].start);
    }
}

#[test]
fn repeated_calls_return_identical_results() {
    let busy = vec![
        busy(at(2, 11, 0), at(2, 12, 0)),
        busy(at(3, 9, 30), at(3, 10, 15)),
    ];
    let w = window(2, 5, 45);

    let first = find_slots(&busy, &w).unwrap();
    let second = find_slots(&busy, &w).unwrap();

    assert_eq!(first, second);
}

#[test]
fn unordered_busy_input_gives_same_result_as_sorted() {
    let sorted = vec![
        busy(at(2, 9, 0), at(2, 10, 0)),
        busy(at(2, 13, 0), at(2, 14, 0)),
        busy(at(3, 15, 0), at(3, 16, 0)),
    ];
    let mut reversed = sorted.clone();
    reversed.reverse();
    let w = window(2, 4, 60);

    assert_eq!(find_slots(&sorted, &w).unwrap(), find_slots(&reversed, &w).unwrap());
}

#[test]
fn first_slot_skips_busy_morning() {
    let busy = vec![busy(at(2, 9, 0), at(2, 12, 0))];

    let first = find_first_slot(&busy, &window(2, 3, 60)).unwrap();

    assert_eq!(first.map(|s| s.start), Some(at(2, 12, 0)));
}

#[test]
fn first_slot_none_when_fully_booked() {
    let busy = vec![busy(at(2, 0, 0), at(4, 0, 0))];
    assert_eq!(find_first_slot(&busy, &window(2, 4, 60)).unwrap(), None);
}

// ── Invalid windows ─────────────────────────────────────────────────────────

fn assert_invalid(w: &SearchWindow) {
    match find_slots(&[], w) {
        Err(SlotError::InvalidWindow(_)) => {}
        other => panic!("expected InvalidWindow, got {:?}", other),
    }
}

#[test]
fn zero_duration_is_invalid() {
    assert_invalid(&window(2, 3, 0));
}

#[test]
fn negative_duration_is_invalid() {
    assert_invalid(&window(2, 3, -30));
}

#[test]
fn zero_step_is_invalid() {
    assert_invalid(&window(2, 3, 60).with_step(0));
}

#[test]
fn end_date_not_after_start_is_invalid() {
    assert_invalid(&window(3, 3, 60));
    assert_invalid(&window(4, 3, 60));
}

#[test]
fn inverted_business_hours_are_invalid() {
    assert_invalid(&window(2, 3, 60).with_business_hours(18, 9));
    assert_invalid(&window(2, 3, 60).with_business_hours(9, 9));
}

#[test]
fn business_hours_out_of_range_are_invalid() {
    assert_invalid(&window(2, 3, 60).with_business_hours(9, 25));
    assert_invalid(&window(2, 3, 60).with_business_hours(0, 18));
}

#[test]
fn overlong_window_is_invalid() {
    let w = SearchWindow::new(
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2028, 1, 1).unwrap(),
        60,
    );
    assert_invalid(&w);
}

#[test]
fn business_hours_until_midnight_are_valid() {
    let w = window(2, 3, 60).with_business_hours(22, 24);

    let slots = find_slots(&[], &w).unwrap();

    assert_eq!(slots.len(), 3);
    assert_eq!(slots[2].end, at(3, 0, 0));
}
