//! Deadline and triage lifecycle engine for inpatient echo requests.
//!
//! The engine is synchronous, stateless across calls, and free of I/O:
//! timestamps come from an injected [`clock::Clock`], the holiday calendar
//! and working window from validated [`config::SiteConfig`], and records
//! from a [`store::RequestStore`] collaborator. Everything downstream
//! (transport, rendering, persistence engines) lives outside this crate.

pub mod calendar;
pub mod clock;
pub mod config;
pub mod deadline;
pub mod intake;
pub mod lifecycle;
pub mod stats;
pub mod store;

pub use calendar::{WorkingCalendar, WorkingWindow};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigurationError, RawSiteConfig, SiteConfig};
pub use deadline::compute_deadline;
pub use intake::{IntakeError, Submission, create_request, next_reference};
pub use lifecycle::{TransitionError, complete, is_overdue, revert, was_late};
pub use stats::{
    DailyActivity, DailyCount, TodaySnapshot, average_time_to_completion,
    count_by_pathway_and_status, daily_activity, daily_overdue, daily_peak_pending,
    overdue_count, today_snapshot,
};
pub use store::{MemoryStore, RequestStore, StoreError};
