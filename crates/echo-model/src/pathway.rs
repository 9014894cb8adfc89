//! Triage pathway catalog.
//!
//! Every inpatient echo request is triaged onto exactly one pathway, and the
//! pathway alone determines the completion target. The catalog is a closed
//! enum so that a new pathway cannot be introduced without the compiler
//! pointing at every place that must handle it.
//!
//! # Wire names
//!
//! The upstream system exchanges pathways as upper-case strings
//! (`"PURPLE PATHWAY"`, `"RED PATHWAY"`, ...). It historically stored two
//! spellings for the no-deadline category, `"GREEN PATHWAY"` and
//! `"REJECTED"`, and folded them together in every read query. The fold is
//! permanent here: both spellings parse to [`TriagePathway::GreenRejected`],
//! which always renders as `"GREEN PATHWAY"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Triage category determining urgency and completion target.
///
/// Serialized under the wire names, so data files stay readable by the
/// source system's tooling; the legacy `"REJECTED"` spelling is accepted on
/// input only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TriagePathway {
    /// Inpatient urgent: 1 working hour.
    #[serde(rename = "PURPLE PATHWAY")]
    Purple,
    /// Same working day: 24 working hours.
    #[serde(rename = "RED PATHWAY")]
    Red,
    /// Routine inpatient: 72 working hours.
    #[serde(rename = "AMBER PATHWAY")]
    Amber,
    /// Triaged green or rejected outright; no completion target.
    #[serde(rename = "GREEN PATHWAY", alias = "REJECTED")]
    GreenRejected,
}

impl TriagePathway {
    /// All pathways in triage-priority order.
    pub const ALL: [TriagePathway; 4] = [
        TriagePathway::Purple,
        TriagePathway::Red,
        TriagePathway::Amber,
        TriagePathway::GreenRejected,
    ];

    /// Completion target in working hours; `None` for pathways that carry
    /// no deadline.
    pub fn target_working_hours(&self) -> Option<u32> {
        match self {
            TriagePathway::Purple => Some(1),
            TriagePathway::Red => Some(24),
            TriagePathway::Amber => Some(72),
            TriagePathway::GreenRejected => None,
        }
    }

    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriagePathway::Purple => "PURPLE PATHWAY",
            TriagePathway::Red => "RED PATHWAY",
            TriagePathway::Amber => "AMBER PATHWAY",
            TriagePathway::GreenRejected => "GREEN PATHWAY",
        }
    }

    /// Short display label for table output.
    pub fn label(&self) -> &'static str {
        match self {
            TriagePathway::Purple => "Purple",
            TriagePathway::Red => "Red",
            TriagePathway::Amber => "Amber",
            TriagePathway::GreenRejected => "Green",
        }
    }

    /// True if this pathway carries a completion target.
    pub fn has_deadline(&self) -> bool {
        self.target_working_hours().is_some()
    }
}

impl fmt::Display for TriagePathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TriagePathway {
    type Err = ModelError;

    /// Parse a pathway wire name, case-insensitively. Unknown names are an
    /// error; callers at the intake boundary must reject the request before
    /// it enters the lifecycle.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PURPLE PATHWAY" | "PURPLE" => Ok(TriagePathway::Purple),
            "RED PATHWAY" | "RED" => Ok(TriagePathway::Red),
            "AMBER PATHWAY" | "AMBER" => Ok(TriagePathway::Amber),
            "GREEN PATHWAY" | "GREEN" | "REJECTED" => Ok(TriagePathway::GreenRejected),
            _ => Err(ModelError::InvalidPathway(s.to_string())),
        }
    }
}
