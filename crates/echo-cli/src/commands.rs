//! Subcommand implementations.
//!
//! Each command loads the site config and data file, runs the engine, and
//! writes the data file back when it mutated anything. All time reads
//! happen here, at the edge, via [`Clock`].

use std::cmp::Reverse;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDateTime, TimeDelta};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use tracing::{info, warn};

use echo_core::{
    Clock, RequestStore, SiteConfig, Submission, SystemClock,
    average_time_to_completion, complete, create_request, daily_activity, daily_overdue,
    daily_peak_pending, is_overdue, next_reference, revert, today_snapshot, was_late,
};
use echo_model::{EchoRequest, RequestId, TriagePathway};

use crate::cli::{AddArgs, EditArgs, IdArg, StatsArgs};
use echo_cli::datafile::{load_store, save_store};

pub fn run_add(args: &AddArgs, config_path: &Path, data_path: &Path) -> Result<()> {
    let config = load_site_config(config_path)?;
    let store = load_store(data_path)?;
    let now = SystemClock.now();
    let created_at = match &args.requested_at {
        Some(text) => parse_datetime(text)?,
        None => now,
    };

    let submission = Submission {
        pathway: args.pathway.clone(),
        patient_name: args.patient_name.clone(),
        mrn: args.mrn.clone(),
        ward: args.ward.clone(),
        notes: args.notes.clone(),
    };
    let id = store.allocate_id();
    let reference = {
        let snapshot = store.snapshot();
        next_reference(snapshot.iter().map(|r| r.reference.as_str()), created_at)
    };
    let request = create_request(
        &config.calendar,
        &submission,
        id,
        reference,
        created_at,
        &config.wards,
    )?;

    println!("Registered {} ({})", request.reference, request.pathway);
    match request.deadline {
        Some(deadline) => println!("Deadline: {}", format_datetime(deadline)),
        None => println!("No deadline for this pathway"),
    }
    store.insert(request);
    save_store(data_path, &store)
}

pub fn run_complete(args: &IdArg, data_path: &Path) -> Result<()> {
    let store = load_store(data_path)?;
    let now = SystemClock.now();
    let id = RequestId::new(args.id);
    store
        .update(id, |request| complete(request, now))
        .context("look up request")?
        .map_err(|conflict| anyhow!("conflict: {conflict}"))?;
    info!(id = %id, "marked completed");
    save_store(data_path, &store)
}

pub fn run_undo(args: &IdArg, data_path: &Path) -> Result<()> {
    let store = load_store(data_path)?;
    let id = RequestId::new(args.id);
    store
        .update(id, revert)
        .context("look up request")?
        .map_err(|conflict| anyhow!("conflict: {conflict}"))?;
    info!(id = %id, "completion reverted");
    save_store(data_path, &store)
}

pub fn run_edit(args: &EditArgs, config_path: &Path, data_path: &Path) -> Result<()> {
    let config = load_site_config(config_path)?;
    let store = load_store(data_path)?;
    let id = RequestId::new(args.id);
    if let Some(ward) = &args.ward
        && !ward.is_empty()
        && !config.wards.is_empty()
        && !config.wards.contains(ward)
    {
        return Err(anyhow!("unknown ward {ward:?}"));
    }
    // Field edits never touch pathway, deadline, status or timestamps.
    store
        .update(id, |request| {
            if let Some(patient_name) = &args.patient_name {
                request.patient_name = patient_name.clone();
            }
            if let Some(mrn) = &args.mrn {
                request.mrn = mrn.clone();
            }
            if let Some(ward) = &args.ward {
                request.ward = ward.clone();
            }
            if let Some(notes) = &args.notes {
                request.notes = notes.clone();
            }
            Ok::<(), std::convert::Infallible>(())
        })
        .context("look up request")?
        .unwrap_or(());
    save_store(data_path, &store)
}

pub fn run_delete(args: &IdArg, data_path: &Path) -> Result<()> {
    let store = load_store(data_path)?;
    let id = RequestId::new(args.id);
    store
        .delete(id)
        .with_context(|| format!("delete request {id}"))?;
    info!(id = %id, "request deleted");
    save_store(data_path, &store)
}

pub fn run_list(data_path: &Path) -> Result<()> {
    let store = load_store(data_path)?;
    let now = SystemClock.now();
    let mut requests = store.snapshot();
    sort_for_triage_board(&mut requests, now);

    let mut table = styled_table();
    table.set_header(vec![
        "Id", "Ref", "Pathway", "Patient", "Ward", "Requested", "Deadline", "Status",
    ]);
    align_column(&mut table, 0, CellAlignment::Right);
    for request in &requests {
        table.add_row(vec![
            Cell::new(request.id),
            Cell::new(&request.reference),
            Cell::new(request.pathway.label()),
            Cell::new(&request.patient_name),
            Cell::new(&request.ward),
            Cell::new(format_datetime(request.created_at)),
            Cell::new(
                request
                    .deadline
                    .map(format_datetime)
                    .unwrap_or_default(),
            ),
            status_cell(request, now),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_stats(args: &StatsArgs, data_path: &Path) -> Result<()> {
    let store = load_store(data_path)?;
    let now = SystemClock.now();
    let requests = store.snapshot();

    let snapshot = today_snapshot(&requests, now);
    println!("Today ({})", now.date().format("%d/%m/%Y"));
    let mut table = styled_table();
    table.set_header(vec!["Pathway", "Pending", "Avg completion"]);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (pathway, pending) in &snapshot.pending {
        let average = average_time_to_completion(&requests, *pathway)
            .map(format_duration)
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(pathway.label()),
            Cell::new(pending),
            Cell::new(average),
        ]);
    }
    println!("{table}");
    println!(
        "Performed today: {}   Green/rejected today: {}   Overdue now: {}",
        snapshot.performed_today, snapshot.triaged_green_today, snapshot.overdue
    );

    println!();
    println!("Daily activity (last {} days)", args.window_days);
    let overdue = daily_overdue(&requests, now.date(), args.window_days);
    let peak_pending = daily_peak_pending(&requests, now.date(), args.window_days);
    let mut table = styled_table();
    table.set_header(vec!["Date", "Created", "Completed", "Overdue", "Peak pending"]);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (index, row) in daily_activity(&requests, now.date(), args.window_days)
        .iter()
        .enumerate()
    {
        table.add_row(vec![
            Cell::new(row.date.format("%d/%m/%Y")),
            Cell::new(row.created),
            Cell::new(row.completed),
            Cell::new(overdue.get(index).map_or(0, |r| r.count)),
            Cell::new(peak_pending.get(index).map_or(0, |r| r.count)),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_pathways() -> Result<()> {
    let mut table = styled_table();
    table.set_header(vec!["Pathway", "Wire name", "Target (working hours)"]);
    align_column(&mut table, 2, CellAlignment::Right);
    for pathway in TriagePathway::ALL {
        let target = pathway
            .target_working_hours()
            .map(|hours| hours.to_string())
            .unwrap_or_else(|| "none".to_string());
        table.add_row(vec![
            pathway.label().to_string(),
            pathway.as_str().to_string(),
            target,
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Board order from the source system: active pending requests by time
/// left to deadline, then green/rejected newest first, then completed
/// newest first.
fn sort_for_triage_board(requests: &mut [EchoRequest], now: NaiveDateTime) {
    requests.sort_by_key(|request| {
        if request.is_completed() {
            (2, TimeDelta::zero(), Reverse(request.completed_at))
        } else if request.pathway == TriagePathway::GreenRejected {
            (1, TimeDelta::zero(), Reverse(Some(request.created_at)))
        } else {
            let time_left = request
                .deadline
                .map_or(TimeDelta::zero(), |deadline| deadline - now);
            (0, time_left, Reverse(None))
        }
    });
}

fn status_cell(request: &EchoRequest, now: NaiveDateTime) -> Cell {
    if is_overdue(request, now) {
        Cell::new("OVERDUE").fg(Color::Red)
    } else if was_late(request) {
        Cell::new("completed late").fg(Color::Yellow)
    } else {
        Cell::new(request.status)
    }
}

fn load_site_config(path: &Path) -> Result<SiteConfig> {
    if !path.exists() {
        warn!(path = %path.display(), "site config missing, using defaults");
        return Ok(SiteConfig {
            calendar: echo_core::WorkingCalendar::default(),
            wards: Vec::new(),
        });
    }
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    Ok(SiteConfig::from_json_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?)
}

fn parse_datetime(text: &str) -> Result<NaiveDateTime> {
    let trimmed = text.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map_err(|_| anyhow!("invalid datetime {text:?}: expected YYYY-MM-DDTHH:MM"))
}

/// The display format the source system used everywhere.
fn format_datetime(t: NaiveDateTime) -> String {
    t.format("%d/%m/%Y @ %H:%M").to_string()
}

fn format_duration(duration: TimeDelta) -> String {
    let minutes = duration.num_minutes();
    format!("{}h{:02}m", minutes / 60, minutes % 60)
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
