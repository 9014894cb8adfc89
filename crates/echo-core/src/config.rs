//! Site configuration: bank holidays, working window, ward options.
//!
//! Configuration arrives as loosely-typed JSON (the shape of the source
//! deployment's `config.json`) and is validated once, at startup, into the
//! strong types the engine uses. Malformed entries are a
//! [`ConfigurationError`] and must prevent startup; nothing here is
//! re-validated per calculation.
//!
//! The core only parses and validates text it is handed; reading the file
//! belongs to the I/O layer.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::calendar::{WorkingCalendar, WorkingWindow};

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("malformed holiday date {value:?}: expected YYYY-MM-DD")]
    MalformedHolidayDate { value: String },
    #[error("malformed working-window time {value:?}: expected HH:MM")]
    MalformedWindowTime { value: String },
    #[error("invalid working window: start minute {start} must precede end minute {end} (max 1440)")]
    InvalidWindow { start: u32, end: u32 },
    #[error("invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw site config as found on disk. Field names follow the source
/// deployment's `config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSiteConfig {
    #[serde(default)]
    pub bank_holidays: Vec<String>,
    #[serde(default)]
    pub working_window: Option<RawWorkingWindow>,
    #[serde(default)]
    pub wards: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWorkingWindow {
    pub start: String,
    pub end: String,
}

/// Validated site configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub calendar: WorkingCalendar,
    pub wards: Vec<String>,
}

impl SiteConfig {
    /// Parse and validate a JSON site config document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigurationError> {
        let raw: RawSiteConfig = serde_json::from_str(text)?;
        raw.validate()
    }
}

impl RawSiteConfig {
    /// Validate every holiday date and the window bounds, producing the
    /// immutable [`SiteConfig`]. Duplicate holidays collapse.
    pub fn validate(self) -> Result<SiteConfig, ConfigurationError> {
        let mut holidays = Vec::with_capacity(self.bank_holidays.len());
        for entry in &self.bank_holidays {
            let date = NaiveDate::parse_from_str(entry.trim(), "%Y-%m-%d").map_err(|_| {
                ConfigurationError::MalformedHolidayDate {
                    value: entry.clone(),
                }
            })?;
            holidays.push(date);
        }

        let window = match &self.working_window {
            None => WorkingWindow::full_day(),
            Some(raw) => {
                let start = parse_window_time(&raw.start)?;
                let end = parse_window_time(&raw.end)?;
                WorkingWindow::from_times(start, end)?
            }
        };

        debug!(
            holidays = holidays.len(),
            window_start = window.start_minute(),
            window_end = window.end_minute(),
            wards = self.wards.len(),
            "site config validated"
        );

        Ok(SiteConfig {
            calendar: WorkingCalendar::new(window, holidays),
            wards: self.wards,
        })
    }
}

fn parse_window_time(value: &str) -> Result<NaiveTime, ConfigurationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        ConfigurationError::MalformedWindowTime {
            value: value.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_day_window_by_default() {
        let config = SiteConfig::from_json_str(r#"{"bank_holidays": []}"#).unwrap();
        assert_eq!(config.calendar.working_minutes_per_day(), 1440);
    }

    #[test]
    fn malformed_holiday_fails_at_load() {
        let err = SiteConfig::from_json_str(r#"{"bank_holidays": ["25/12/2026"]}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MalformedHolidayDate { .. }
        ));
    }

    #[test]
    fn business_window_parses() {
        let config = SiteConfig::from_json_str(
            r#"{"bank_holidays": [], "working_window": {"start": "09:00", "end": "17:00"}}"#,
        )
        .unwrap();
        assert_eq!(config.calendar.working_minutes_per_day(), 8 * 60);
    }

    #[test]
    fn inverted_window_fails_at_load() {
        let err = SiteConfig::from_json_str(
            r#"{"bank_holidays": [], "working_window": {"start": "17:00", "end": "09:00"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidWindow { .. }));
    }
}
