//! The echo request record and its identifiers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::pathway::TriagePathway;

/// Storage identifier for a request.
///
/// Assigned once at creation and never reassigned or reused, even after the
/// record is deleted; the store's counter only grows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "completed" => Ok(RequestStatus::Completed),
            _ => Err(ModelError::InvalidStatus(s.to_string())),
        }
    }
}

/// An inpatient echo request tracked through the triage pathway.
///
/// Invariants maintained by the engine:
/// - `deadline` is present iff the pathway carries a target.
/// - `completed_at` is present iff `status == Completed`.
/// - `deadline` is computed once at intake and never recomputed; edits to
///   the free-text fields leave it untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoRequest {
    pub id: RequestId,
    /// Human-facing booking number in `YY.NNNN` form (two-digit year,
    /// per-year sequence).
    pub reference: String,
    pub pathway: TriagePathway,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub mrn: String,
    #[serde(default)]
    pub ward: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: NaiveDateTime,
    pub deadline: Option<NaiveDateTime>,
    pub status: RequestStatus,
    pub completed_at: Option<NaiveDateTime>,
}

impl EchoRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn is_completed(&self) -> bool {
        self.status == RequestStatus::Completed
    }
}
