//! Tests for the working-hours calendar.
//!
//! Scenario names follow the deployment's triage rules: Sat/Sun are
//! non-working, bank holidays come from config, and the working window is
//! either the full day (default) or a business window like 09:00-17:00.

use chrono::{NaiveDate, NaiveDateTime};
use echo_core::{WorkingCalendar, WorkingWindow};
use proptest::prelude::*;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn business_hours() -> WorkingCalendar {
    WorkingCalendar::new(
        WorkingWindow::from_minutes(9 * 60, 17 * 60).unwrap(),
        [],
    )
}

#[test]
fn zero_hours_is_identity() {
    let calendar = business_hours();
    // Monday mid-window and Saturday outside any window alike.
    for start in [dt(2026, 3, 2, 10, 0), dt(2026, 3, 7, 12, 30)] {
        assert_eq!(calendar.advance(start, 0), start);
    }
}

#[test]
fn red_pathway_across_a_weekend() {
    // Friday 10:00 + 24 working hours at 8h/day: the rest of Friday (7h),
    // Monday (8h), Tuesday (8h), and one hour into Wednesday.
    let calendar = business_hours();
    let start = dt(2026, 3, 6, 10, 0); // Friday
    assert_eq!(calendar.advance(start, 24), dt(2026, 3, 11, 10, 0)); // Wednesday
}

#[test]
fn partial_hour_rolls_into_next_day() {
    // Purple: one hour from 16:30 leaves 30 minutes to carry past 17:00.
    let calendar = business_hours();
    let start = dt(2026, 3, 2, 16, 30); // Monday
    assert_eq!(calendar.advance(start, 1), dt(2026, 3, 3, 9, 30));
}

#[test]
fn start_on_weekend_jumps_to_monday_window() {
    let calendar = business_hours();
    let start = dt(2026, 3, 7, 12, 0); // Saturday
    assert_eq!(calendar.advance(start, 1), dt(2026, 3, 9, 10, 0));
}

#[test]
fn start_before_window_clamps_to_window_start() {
    let calendar = business_hours();
    let start = dt(2026, 3, 2, 7, 15); // Monday, before opening
    assert_eq!(calendar.advance(start, 2), dt(2026, 3, 2, 11, 0));
}

#[test]
fn holiday_is_skipped_entirely() {
    let good_friday = NaiveDate::from_ymd_opt(2026, 4, 3).unwrap();
    let calendar = WorkingCalendar::new(
        WorkingWindow::from_minutes(9 * 60, 17 * 60).unwrap(),
        [good_friday],
    );
    // Thursday 16:00 + 2h: one hour to close, then Friday and the weekend
    // are skipped, one hour into Monday.
    let start = dt(2026, 4, 2, 16, 0);
    assert_eq!(calendar.advance(start, 2), dt(2026, 4, 6, 10, 0));
}

#[test]
fn full_day_window_counts_whole_weekdays() {
    let calendar = WorkingCalendar::default();
    // Friday 10:00 + 24h: 14h left of Friday, 10h into Monday.
    let start = dt(2026, 3, 6, 10, 0);
    assert_eq!(calendar.advance(start, 24), dt(2026, 3, 9, 10, 0));
}

#[test]
fn exact_window_close_is_reachable() {
    let calendar = business_hours();
    // Seven hours from 10:00 lands exactly on the 17:00 boundary.
    let start = dt(2026, 3, 2, 10, 0);
    assert_eq!(calendar.advance(start, 7), dt(2026, 3, 2, 17, 0));
}

#[test]
fn working_instant_respects_window_and_day() {
    let calendar = business_hours();
    assert!(calendar.is_working_instant(dt(2026, 3, 2, 9, 0)));
    assert!(!calendar.is_working_instant(dt(2026, 3, 2, 17, 0)));
    assert!(!calendar.is_working_instant(dt(2026, 3, 2, 8, 59)));
    assert!(!calendar.is_working_instant(dt(2026, 3, 8, 12, 0))); // Sunday
}

proptest! {
    /// `advance` is monotonic in the hour count.
    #[test]
    fn advance_is_monotonic(
        offset_minutes in 0i64..(365 * 24 * 60),
        a in 0u32..200,
        b in 0u32..200,
    ) {
        let calendar = WorkingCalendar::new(
            WorkingWindow::from_minutes(9 * 60, 17 * 60).unwrap(),
            [
                NaiveDate::from_ymd_opt(2026, 4, 3).unwrap(),
                NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            ],
        );
        let start = dt(2026, 1, 1, 0, 0) + chrono::Duration::minutes(offset_minutes);
        let (h1, h2) = (a.min(b), a.max(b));
        prop_assert!(calendar.advance(start, h1) <= calendar.advance(start, h2));
    }

    /// A positive advance never lands inside a weekend or holiday.
    #[test]
    fn advance_lands_on_working_days(
        offset_minutes in 0i64..(365 * 24 * 60),
        hours in 1u32..200,
    ) {
        let calendar = WorkingCalendar::new(
            WorkingWindow::from_minutes(9 * 60, 17 * 60).unwrap(),
            [NaiveDate::from_ymd_opt(2026, 4, 3).unwrap()],
        );
        let start = dt(2026, 1, 1, 0, 0) + chrono::Duration::minutes(offset_minutes);
        let deadline = calendar.advance(start, hours);
        prop_assert!(calendar.is_working_day(deadline.date()));
        prop_assert!(deadline > start);
    }
}
