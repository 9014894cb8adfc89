//! Tests for data-file persistence.

use chrono::NaiveDate;
use echo_cli::datafile::{load_store, save_store};
use echo_core::RequestStore;
use echo_model::{EchoRequest, RequestStatus, TriagePathway};
use std::path::PathBuf;

fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("echo-intrack-test-{}-{name}.json", std::process::id()));
    path
}

#[test]
fn missing_file_loads_an_empty_store() {
    let path = scratch_path("missing");
    let store = load_store(&path).expect("missing file is fine");
    assert!(store.snapshot().is_empty());
}

#[test]
fn save_and_reload_preserves_records_and_id_counter() {
    let path = scratch_path("roundtrip");
    let store = load_store(&path).unwrap();

    let id = store.allocate_id();
    let created = NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    store.insert(EchoRequest {
        id,
        reference: "26.0001".to_string(),
        pathway: TriagePathway::Amber,
        patient_name: "Test Patient".to_string(),
        mrn: "A123456".to_string(),
        ward: "CCU".to_string(),
        notes: "portable".to_string(),
        created_at: created,
        deadline: Some(created + chrono::Duration::hours(72)),
        status: RequestStatus::Pending,
        completed_at: None,
    });
    save_store(&path, &store).expect("save store");

    let reloaded = load_store(&path).expect("reload store");
    assert_eq!(reloaded.snapshot(), store.snapshot());
    // The id sequence continues where it left off.
    assert!(reloaded.allocate_id() > id);

    std::fs::remove_file(&path).ok();
}
