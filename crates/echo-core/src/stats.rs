//! Read-side aggregation for the dashboard.
//!
//! Every function here is a pure fold over a snapshot of the request
//! collection plus an explicit reference time. Nothing is mutated and
//! nothing is cached; callers re-run the aggregation whenever they need
//! fresh numbers, accepting that a concurrent writer may make the snapshot
//! slightly stale.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use echo_model::{EchoRequest, RequestStatus, TriagePathway};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::lifecycle::is_overdue;

/// Hard ceiling on history windows, ten years of days. Keeps a bad
/// `window_days` from allocating one row per day since `NaiveDate::MIN`.
const MAX_WINDOW_DAYS: u32 = 3650;

/// First day of the window ending at `today`, inclusive.
fn window_start(today: NaiveDate, window_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(window_days.min(MAX_WINDOW_DAYS))))
        .unwrap_or(NaiveDate::MIN)
}

/// Count of requests per (pathway, status) pair. Pairs with no requests
/// are absent.
pub fn count_by_pathway_and_status(
    requests: &[EchoRequest],
) -> BTreeMap<(TriagePathway, RequestStatus), usize> {
    let mut counts = BTreeMap::new();
    for request in requests {
        *counts.entry((request.pathway, request.status)).or_insert(0) += 1;
    }
    counts
}

/// Number of requests currently overdue as of `now`.
pub fn overdue_count(requests: &[EchoRequest], now: NaiveDateTime) -> usize {
    requests.iter().filter(|r| is_overdue(r, now)).count()
}

/// One day of intake/completion activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub created: usize,
    pub completed: usize,
}

/// Daily created/completed counts for the window ending at `today`.
///
/// Returns one entry per calendar day from `today - window_days` through
/// `today` inclusive (`window_days + 1` entries), oldest first. Days with
/// no activity still appear, zero-filled, so chart axes stay dense.
pub fn daily_activity(
    requests: &[EchoRequest],
    today: NaiveDate,
    window_days: u32,
) -> Vec<DailyActivity> {
    let start = window_start(today, window_days);

    let mut created: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut completed: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for request in requests {
        let day = request.created_at.date();
        if day >= start && day <= today {
            *created.entry(day).or_insert(0) += 1;
        }
        if let Some(completed_at) = request.completed_at {
            let day = completed_at.date();
            if day >= start && day <= today {
                *completed.entry(day).or_insert(0) += 1;
            }
        }
    }

    start
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|date| DailyActivity {
            date,
            created: created.get(&date).copied().unwrap_or(0),
            completed: completed.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// One day of a single-count history series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Requests that were overdue at some point during each day of the window
/// ending at `today`, oldest first.
///
/// A request counts toward a day when its deadline had passed before the
/// day ended and it was still pending for some part of the day after the
/// deadline. Pathways without a deadline never appear. A request completed
/// late therefore counts on every day from its deadline through its
/// completion day, and on no day after.
pub fn daily_overdue(
    requests: &[EchoRequest],
    today: NaiveDate,
    window_days: u32,
) -> Vec<DailyCount> {
    window_start(today, window_days)
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|date| {
            let day_start = date.and_time(NaiveTime::MIN);
            let day_end = day_start + Duration::days(1);
            let count = requests
                .iter()
                .filter(|r| {
                    r.deadline.is_some_and(|deadline| {
                        let from = deadline.max(day_start);
                        let until = r.completed_at.map_or(day_end, |at| at.min(day_end));
                        from < until
                    })
                })
                .count();
            DailyCount { date, count }
        })
        .collect()
}

/// Deadline-bearing requests pending at some point during each day of the
/// window ending at `today`, oldest first.
///
/// This is the peak of the pending pile for the day: a request counts when
/// its pending interval, intake to completion, overlaps the day at all.
pub fn daily_peak_pending(
    requests: &[EchoRequest],
    today: NaiveDate,
    window_days: u32,
) -> Vec<DailyCount> {
    window_start(today, window_days)
        .iter_days()
        .take_while(|day| *day <= today)
        .map(|date| {
            let day_start = date.and_time(NaiveTime::MIN);
            let day_end = day_start + Duration::days(1);
            let count = requests
                .iter()
                .filter(|r| {
                    r.pathway.has_deadline()
                        && r.created_at < day_end
                        && r.completed_at.is_none_or(|at| at >= day_start)
                })
                .count();
            DailyCount { date, count }
        })
        .collect()
}

/// Mean time from intake to completion for completed requests of
/// `pathway`; `None` when none are completed.
pub fn average_time_to_completion(
    requests: &[EchoRequest],
    pathway: TriagePathway,
) -> Option<Duration> {
    let durations: Vec<Duration> = requests
        .iter()
        .filter(|r| r.pathway == pathway)
        .filter_map(|r| r.completed_at.map(|at| at - r.created_at))
        .collect();
    if durations.is_empty() {
        return None;
    }
    let total = durations
        .iter()
        .fold(Duration::zero(), |acc, d| acc + *d);
    Some(total / durations.len() as i32)
}

/// Point-in-time dashboard numbers, as the source system's today panel
/// showed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodaySnapshot {
    /// Pending requests per deadline-bearing pathway (all pending, not
    /// just today's).
    pub pending: BTreeMap<TriagePathway, usize>,
    /// Green/rejected requests triaged today.
    pub triaged_green_today: usize,
    /// Requests completed today.
    pub performed_today: usize,
    /// Requests overdue as of `now`.
    pub overdue: usize,
}

/// Compute the today panel for the dashboard.
pub fn today_snapshot(requests: &[EchoRequest], now: NaiveDateTime) -> TodaySnapshot {
    let today = now.date();
    let mut pending: BTreeMap<TriagePathway, usize> = TriagePathway::ALL
        .iter()
        .filter(|p| p.has_deadline())
        .map(|p| (*p, 0))
        .collect();
    let mut triaged_green_today = 0;
    let mut performed_today = 0;

    for request in requests {
        match request.pathway {
            TriagePathway::GreenRejected => {
                if request.created_at.date() == today {
                    triaged_green_today += 1;
                }
            }
            pathway if request.is_pending() => {
                *pending.entry(pathway).or_insert(0) += 1;
            }
            _ => {}
        }
        if request
            .completed_at
            .is_some_and(|at| at.date() == today)
        {
            performed_today += 1;
        }
    }

    TodaySnapshot {
        pending,
        triaged_green_today,
        performed_today,
        overdue: overdue_count(requests, now),
    }
}
