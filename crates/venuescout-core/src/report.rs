//! The JSON report written at the end of every run.
//!
//! The on-disk shape uses camelCase keys (`lastUpdated`, `venueUrl`,
//! `bandUrl`) because the report is consumed directly by a static web page.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to access report {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode or decode report {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One venue listing in the report.
///
/// `address` is only known for venues found through the places API, so it is
/// omitted from the JSON for scraped venues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub venue: String,
    pub venue_url: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub band: String,
    pub band_url: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub last_updated: String,
    pub events: Vec<Event>,
}

impl Report {
    /// Builds a report stamped with `last_updated`, sorting `events` by venue name.
    #[must_use]
    pub fn new(last_updated: impl Into<String>, mut events: Vec<Event>) -> Self {
        sort_events(&mut events);
        Self {
            last_updated: last_updated.into(),
            events,
        }
    }

    /// Builds a report that keeps `events` in the order given.
    #[must_use]
    pub fn in_order(last_updated: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            last_updated: last_updated.into(),
            events,
        }
    }
}

/// Sorts events by venue name, ascending.
///
/// Uses `str` ordering, which compares bytes: it is case-sensitive and every
/// uppercase ASCII letter sorts before every lowercase one. The sort is
/// stable, so equal names keep their discovery order.
pub fn sort_events(events: &mut [Event]) {
    events.sort_by(|a, b| a.venue.cmp(&b.venue));
}

/// Today's local date as `YYYY-MM-DD`.
#[must_use]
pub fn today_stamp() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Serializes `report` as pretty JSON and overwrites `path`.
///
/// Parent directories are created if missing.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the directory or file cannot be written.
pub fn write_report(path: &Path, report: &Report) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut body = serde_json::to_string_pretty(report).map_err(|e| ReportError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    body.push('\n');
    std::fs::write(path, body).map_err(io_err)
}

/// Reads and parses a report previously produced by [`write_report`].
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the file cannot be read and
/// [`ReportError::Json`] if it is not a valid report.
pub fn read_report(path: &Path) -> Result<Report, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ReportError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
