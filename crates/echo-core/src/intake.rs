//! Intake boundary: where raw submissions become tracked requests.
//!
//! All validation of caller-supplied values happens here, before a record
//! enters the lifecycle; an unknown pathway or ward never reaches the
//! store. The deadline is computed once during intake and stored on the
//! record.

use chrono::{Datelike, NaiveDateTime};
use echo_model::{EchoRequest, RequestId, RequestStatus, TriagePathway};
use thiserror::Error;
use tracing::info;

use crate::calendar::WorkingCalendar;
use crate::deadline::compute_deadline;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("unknown pathway {value:?}: expected one of PURPLE/RED/AMBER/GREEN PATHWAY or REJECTED")]
    InvalidPathway { value: String },
    #[error("unknown ward {value:?}")]
    UnknownWard { value: String },
}

/// A raw submission as received from the intake collaborator.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub pathway: String,
    pub patient_name: String,
    pub mrn: String,
    pub ward: String,
    pub notes: String,
}

/// Validate a submission and build the pending record.
///
/// `id` and `reference` come from the store (ids are never reused;
/// references follow the per-year sequence, see [`next_reference`]).
/// `ward_options`, when non-empty, restricts the ward field to the
/// configured list; an empty list accepts anything, including blank.
pub fn create_request(
    calendar: &WorkingCalendar,
    submission: &Submission,
    id: RequestId,
    reference: String,
    created_at: NaiveDateTime,
    ward_options: &[String],
) -> Result<EchoRequest, IntakeError> {
    let pathway: TriagePathway =
        submission
            .pathway
            .parse()
            .map_err(|_| IntakeError::InvalidPathway {
                value: submission.pathway.clone(),
            })?;
    if !ward_options.is_empty()
        && !submission.ward.is_empty()
        && !ward_options.iter().any(|w| w == &submission.ward)
    {
        return Err(IntakeError::UnknownWard {
            value: submission.ward.clone(),
        });
    }

    let deadline = compute_deadline(calendar, created_at, pathway);
    info!(
        id = %id,
        reference = %reference,
        pathway = %pathway,
        deadline = ?deadline,
        "request created"
    );

    Ok(EchoRequest {
        id,
        reference,
        pathway,
        patient_name: submission.patient_name.clone(),
        mrn: submission.mrn.clone(),
        ward: submission.ward.clone(),
        notes: submission.notes.clone(),
        created_at,
        deadline,
        status: RequestStatus::Pending,
        completed_at: None,
    })
}

/// Next booking reference for the intake year, in `YY.NNNN` form.
///
/// The sequence restarts at 1 each calendar year and is derived from the
/// highest existing reference for that year, so deleted records leave
/// gaps rather than reused numbers.
pub fn next_reference<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    created_at: NaiveDateTime,
) -> String {
    let year = created_at.year().rem_euclid(100);
    let prefix = format!("{year:02}.");
    let max_seq = existing
        .into_iter()
        .filter_map(|reference| reference.strip_prefix(&prefix))
        .filter_map(|seq| seq.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{year:02}.{:04}", max_seq + 1)
}
