//! Request lifecycle state machine.
//!
//! Two states, two transitions:
//!
//! ```text
//! Pending --complete(at)--> Completed
//! Pending <---revert()----- Completed
//! ```
//!
//! Out-of-state transitions fail with [`TransitionError`] and leave the
//! record untouched; callers surface these as user-facing conflicts, not
//! crashes. Overdue and lateness are derived predicates, never stored
//! state.

use chrono::NaiveDateTime;
use echo_model::{EchoRequest, RequestId, RequestStatus};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("request {id} is already completed")]
    AlreadyCompleted { id: RequestId },
    #[error("request {id} is not completed, nothing to revert")]
    NotCompleted { id: RequestId },
}

/// Mark a pending request completed at `at`.
pub fn complete(request: &mut EchoRequest, at: NaiveDateTime) -> Result<(), TransitionError> {
    if request.is_completed() {
        return Err(TransitionError::AlreadyCompleted { id: request.id });
    }
    request.status = RequestStatus::Completed;
    request.completed_at = Some(at);
    debug!(id = %request.id, completed_at = %at, "request completed");
    Ok(())
}

/// Revert a completed request back to pending, clearing its completion
/// time.
pub fn revert(request: &mut EchoRequest) -> Result<(), TransitionError> {
    if request.is_pending() {
        return Err(TransitionError::NotCompleted { id: request.id });
    }
    request.status = RequestStatus::Pending;
    request.completed_at = None;
    debug!(id = %request.id, "completion reverted");
    Ok(())
}

/// A request is overdue when it is still pending, carries a deadline, and
/// the reference time has passed it. Completed requests are never overdue,
/// whatever their timestamps; see [`was_late`].
pub fn is_overdue(request: &EchoRequest, now: NaiveDateTime) -> bool {
    request.is_pending() && request.deadline.is_some_and(|deadline| now > deadline)
}

/// A completed request was late when its completion fell after its
/// deadline. Lateness is a reporting statistic, distinct from overdue.
pub fn was_late(request: &EchoRequest) -> bool {
    match (request.completed_at, request.deadline) {
        (Some(completed_at), Some(deadline)) => completed_at > deadline,
        _ => false,
    }
}
