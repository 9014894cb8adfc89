//! Tests for the intake boundary.

use chrono::{NaiveDate, NaiveDateTime};
use echo_core::{
    IntakeError, MemoryStore, RequestStore, Submission, WorkingCalendar, WorkingWindow,
    create_request, next_reference,
};
use echo_model::{RequestId, TriagePathway};

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn submission(pathway: &str) -> Submission {
    Submission {
        pathway: pathway.to_string(),
        patient_name: "Test Patient".to_string(),
        mrn: "A123456".to_string(),
        ward: String::new(),
        notes: String::new(),
    }
}

fn business_hours() -> WorkingCalendar {
    WorkingCalendar::new(
        WorkingWindow::from_minutes(9 * 60, 17 * 60).unwrap(),
        [],
    )
}

#[test]
fn red_submission_gets_deadline_and_pending_status() {
    let calendar = business_hours();
    let created_at = dt(2026, 3, 6, 10, 0); // Friday
    let request = create_request(
        &calendar,
        &submission("RED PATHWAY"),
        RequestId::new(1),
        "26.0001".to_string(),
        created_at,
        &[],
    )
    .expect("valid submission");

    assert_eq!(request.pathway, TriagePathway::Red);
    assert!(request.is_pending());
    assert_eq!(request.created_at, created_at);
    assert_eq!(request.deadline, Some(dt(2026, 3, 11, 10, 0)));
    assert!(request.completed_at.is_none());
}

#[test]
fn green_submission_has_no_deadline() {
    let calendar = business_hours();
    for pathway in ["GREEN PATHWAY", "REJECTED"] {
        let request = create_request(
            &calendar,
            &submission(pathway),
            RequestId::new(1),
            "26.0001".to_string(),
            dt(2026, 3, 6, 10, 0),
            &[],
        )
        .expect("valid submission");
        assert_eq!(request.pathway, TriagePathway::GreenRejected);
        assert!(request.deadline.is_none());
    }
}

#[test]
fn unknown_pathway_is_rejected_at_the_boundary() {
    let err = create_request(
        &business_hours(),
        &submission("BLUE PATHWAY"),
        RequestId::new(1),
        "26.0001".to_string(),
        dt(2026, 3, 6, 10, 0),
        &[],
    )
    .unwrap_err();
    assert!(matches!(err, IntakeError::InvalidPathway { value } if value == "BLUE PATHWAY"));
}

#[test]
fn ward_must_come_from_the_configured_list() {
    let wards = vec!["CCU".to_string(), "AMU".to_string()];
    let mut sub = submission("AMBER PATHWAY");
    sub.ward = "Ward 9".to_string();

    let err = create_request(
        &business_hours(),
        &sub,
        RequestId::new(1),
        "26.0001".to_string(),
        dt(2026, 3, 6, 10, 0),
        &wards,
    )
    .unwrap_err();
    assert!(matches!(err, IntakeError::UnknownWard { .. }));

    sub.ward = "CCU".to_string();
    assert!(create_request(
        &business_hours(),
        &sub,
        RequestId::new(1),
        "26.0001".to_string(),
        dt(2026, 3, 6, 10, 0),
        &wards,
    )
    .is_ok());
}

#[test]
fn reference_sequence_starts_at_one_per_year() {
    let at = dt(2026, 1, 5, 9, 0);
    assert_eq!(next_reference([], at), "26.0001");
    assert_eq!(
        next_reference(["26.0001", "26.0002"], at),
        "26.0003"
    );
}

#[test]
fn reference_sequence_ignores_other_years() {
    let at = dt(2027, 1, 4, 9, 0);
    assert_eq!(
        next_reference(["26.0104", "26.0105"], at),
        "27.0001"
    );
}

#[test]
fn deleted_references_leave_gaps() {
    // Highest existing wins even when earlier numbers were deleted.
    let at = dt(2026, 6, 1, 9, 0);
    assert_eq!(next_reference(["26.0007"], at), "26.0008");
}

#[test]
fn store_ids_are_never_reused() {
    let store = MemoryStore::new();
    let first = store.allocate_id();
    let second = store.allocate_id();
    assert!(second > first);

    let request = create_request(
        &business_hours(),
        &submission("PURPLE PATHWAY"),
        second,
        "26.0001".to_string(),
        dt(2026, 3, 6, 10, 0),
        &[],
    )
    .unwrap();
    store.insert(request);
    store.delete(second).unwrap();
    assert!(store.allocate_id() > second);
}
