//! CLI library components for the echo request tracker.

pub mod datafile;
pub mod logging;
