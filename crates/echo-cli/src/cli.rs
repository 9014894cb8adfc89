//! CLI argument definitions for the echo request tracker.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "echo-intrack",
    version,
    about = "Echo InTrack - inpatient echo request triage tracker",
    long_about = "Track inpatient echocardiogram requests through the triage pathway.\n\n\
                  Each request is triaged onto a pathway (purple/red/amber/green) which\n\
                  sets its completion target in working hours; deadlines skip weekends,\n\
                  bank holidays, and time outside the configured working window."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Site configuration file (bank holidays, working window, wards).
    #[arg(
        long = "config",
        value_name = "PATH",
        default_value = "config.json",
        global = true
    )]
    pub config: PathBuf,

    /// JSON data file holding the request records.
    #[arg(
        long = "data",
        value_name = "PATH",
        default_value = "echo-requests.json",
        global = true
    )]
    pub data: PathBuf,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a new echo request.
    Add(AddArgs),

    /// Mark a pending request completed.
    Complete(IdArg),

    /// Revert a completed request back to pending.
    Undo(IdArg),

    /// Edit the free-text fields of a request.
    Edit(EditArgs),

    /// Delete a request; its id is never reused.
    Delete(IdArg),

    /// List requests in triage order.
    List,

    /// Show dashboard statistics.
    Stats(StatsArgs),

    /// List the triage pathways and their completion targets.
    Pathways,
}

#[derive(Args)]
pub struct AddArgs {
    /// Triage pathway: PURPLE/RED/AMBER/GREEN PATHWAY or REJECTED.
    #[arg(long = "pathway", value_name = "PATHWAY")]
    pub pathway: String,

    /// Patient name.
    #[arg(long = "patient", value_name = "NAME", default_value = "")]
    pub patient_name: String,

    /// Medical record number.
    #[arg(long = "mrn", value_name = "MRN", default_value = "")]
    pub mrn: String,

    /// Ward (must come from the configured ward list when one is set).
    #[arg(long = "ward", value_name = "WARD", default_value = "")]
    pub ward: String,

    /// Free-text triage notes.
    #[arg(long = "notes", value_name = "TEXT", default_value = "")]
    pub notes: String,

    /// Request time as YYYY-MM-DDTHH:MM (default: now).
    #[arg(long = "requested-at", value_name = "DATETIME")]
    pub requested_at: Option<String>,
}

#[derive(Args)]
pub struct IdArg {
    /// Storage id of the request.
    #[arg(value_name = "ID")]
    pub id: u64,
}

#[derive(Args)]
pub struct EditArgs {
    /// Storage id of the request.
    #[arg(value_name = "ID")]
    pub id: u64,

    /// New patient name.
    #[arg(long = "patient", value_name = "NAME")]
    pub patient_name: Option<String>,

    /// New medical record number.
    #[arg(long = "mrn", value_name = "MRN")]
    pub mrn: Option<String>,

    /// New ward.
    #[arg(long = "ward", value_name = "WARD")]
    pub ward: Option<String>,

    /// New triage notes.
    #[arg(long = "notes", value_name = "TEXT")]
    pub notes: Option<String>,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Days of history for the daily activity table.
    #[arg(long = "window-days", value_name = "DAYS", default_value_t = 14)]
    pub window_days: u32,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
