//! Working-hours calendar.
//!
//! Every deadline in the system is derived by advancing an intake timestamp
//! across this calendar. A day is non-working when it is a Saturday, a
//! Sunday, or listed in the configured bank-holiday set; within a working
//! day, only the configured window counts toward a deadline.
//!
//! The calendar is an immutable value constructed once from validated
//! configuration. All functions here are pure: no clock reads, no I/O, so
//! `advance` is fully determined by `(start, hours, holidays, window)`.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use std::collections::BTreeSet;

use crate::config::ConfigurationError;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Contiguous daily interval counted toward deadlines, as minutes of the
/// day, half-open `[start, end)`.
///
/// The default window is the full calendar day, matching the source
/// deployment, which counted every hour of a weekday. An end bound of
/// 24:00 is represented as minute 1440.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    start_minute: u32,
    end_minute: u32,
}

impl WorkingWindow {
    /// The full calendar day, 00:00–24:00.
    pub fn full_day() -> Self {
        Self {
            start_minute: 0,
            end_minute: MINUTES_PER_DAY,
        }
    }

    /// Window from `start` to `end` minutes of the day.
    pub fn from_minutes(start: u32, end: u32) -> Result<Self, ConfigurationError> {
        if start >= end || end > MINUTES_PER_DAY {
            return Err(ConfigurationError::InvalidWindow { start, end });
        }
        Ok(Self {
            start_minute: start,
            end_minute: end,
        })
    }

    /// Window between two times of day, e.g. 09:00 to 17:00. An end of
    /// midnight is treated as end-of-day.
    pub fn from_times(start: NaiveTime, end: NaiveTime) -> Result<Self, ConfigurationError> {
        let start_minute = start.hour() * 60 + start.minute();
        let end_minute = if end == NaiveTime::MIN {
            MINUTES_PER_DAY
        } else {
            end.hour() * 60 + end.minute()
        };
        Self::from_minutes(start_minute, end_minute)
    }

    pub fn start_minute(&self) -> u32 {
        self.start_minute
    }

    pub fn end_minute(&self) -> u32 {
        self.end_minute
    }

    /// Minutes of working time in one working day.
    fn span_minutes(&self) -> u32 {
        self.end_minute - self.start_minute
    }

    fn start_time(&self) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(self.start_minute * 60, 0)
            .unwrap_or(NaiveTime::MIN)
    }

    fn contains_minute(&self, minute_of_day: u32) -> bool {
        minute_of_day >= self.start_minute && minute_of_day < self.end_minute
    }
}

impl Default for WorkingWindow {
    fn default() -> Self {
        Self::full_day()
    }
}

/// Immutable calendar of working time: the daily window plus the set of
/// non-working holiday dates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkingCalendar {
    window: WorkingWindow,
    holidays: BTreeSet<NaiveDate>,
}

impl WorkingCalendar {
    /// Build a calendar. Duplicate holiday dates are deduplicated by the
    /// set; validation of raw date strings happens in [`crate::config`].
    pub fn new(window: WorkingWindow, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            window,
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn window(&self) -> WorkingWindow {
        self.window
    }

    pub fn holidays(&self) -> &BTreeSet<NaiveDate> {
        &self.holidays
    }

    /// True unless `date` is a Saturday, a Sunday, or a configured holiday.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }

    /// True if `t` falls on a working day inside the working window.
    pub fn is_working_instant(&self, t: NaiveDateTime) -> bool {
        self.is_working_day(t.date()) && self.window.contains_minute(minute_of_day(t))
    }

    /// Advance `start` by `hours` working hours.
    ///
    /// Time is consumed strictly inside working windows; whenever the
    /// current position lies outside one (weekend, holiday, before or after
    /// the window), it first jumps to the start of the next working window
    /// without consuming anything. Partial hours carry at minute
    /// resolution, so a deadline may land mid-window.
    ///
    /// `hours == 0` returns `start` unchanged, even when `start` itself is
    /// outside any working window.
    pub fn advance(&self, start: NaiveDateTime, hours: u32) -> NaiveDateTime {
        if hours == 0 {
            return start;
        }
        let mut remaining = u64::from(hours) * 60;
        let mut cursor = start;
        loop {
            cursor = self.align_to_window(cursor);
            let available = u64::from(self.window.end_minute - minute_of_day(cursor));
            if remaining <= available {
                return cursor + chrono::Duration::minutes(remaining as i64);
            }
            remaining -= available;
            cursor = self.next_window_start(cursor.date());
        }
    }

    /// Working minutes per day under this calendar's window.
    pub fn working_minutes_per_day(&self) -> u32 {
        self.window.span_minutes()
    }

    /// Move `t` to the nearest position at or after it where working time
    /// can be consumed.
    fn align_to_window(&self, t: NaiveDateTime) -> NaiveDateTime {
        if !self.is_working_day(t.date()) || minute_of_day(t) >= self.window.end_minute {
            return self.next_window_start(t.date());
        }
        if minute_of_day(t) < self.window.start_minute {
            return t.date().and_time(self.window.start_time());
        }
        t
    }

    /// Start of the working window on the next working day after `date`.
    fn next_window_start(&self, date: NaiveDate) -> NaiveDateTime {
        let mut day = date;
        loop {
            day = day
                .checked_add_days(Days::new(1))
                .unwrap_or(NaiveDate::MAX);
            if self.is_working_day(day) {
                return day.and_time(self.window.start_time());
            }
        }
    }
}

fn minute_of_day(t: NaiveDateTime) -> u32 {
    t.time().hour() * 60 + t.time().minute()
}
