//! Deadline computation.

use chrono::NaiveDateTime;
use echo_model::TriagePathway;

use crate::calendar::WorkingCalendar;

/// Compute the completion deadline for a request triaged onto `pathway` at
/// `created_at`: the pathway's target in working hours advanced across the
/// calendar. `None` when the pathway carries no target.
///
/// Called exactly once per request, at intake. Later edits to a request's
/// free-text fields never recompute the deadline, so the SLA recorded at
/// triage time stays auditable.
pub fn compute_deadline(
    calendar: &WorkingCalendar,
    created_at: NaiveDateTime,
    pathway: TriagePathway,
) -> Option<NaiveDateTime> {
    pathway
        .target_working_hours()
        .map(|hours| calendar.advance(created_at, hours))
}
