//! Timestamp parsing and formatting
//!
//! Two renderings exist: the fixed API form (`2019-05-21T21:30:00.000000Z`)
//! used in every JSON view, and human display forms selected with
//! `DateFormat`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed pattern for API-facing timestamps (microseconds, literal `Z`).
pub const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Naive layouts accepted from form posts, interpreted as UTC.
const NAIVE_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("unrecognised timestamp '{value}'")]
    Unparseable { value: String },
}

/// Display style for human-facing dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `EE MM, dd, y h:mma`, e.g. `Tue 05, 21, 2019 9:30PM`
    #[default]
    Medium,
    /// `EEEE MMMM, d, y 'at' h:mma`, e.g. `Tuesday May, 21, 2019 at 9:30PM`
    Full,
}

impl DateFormat {
    fn pattern(&self) -> &'static str {
        match self {
            Self::Medium => "%a %m, %d, %Y %-I:%M%p",
            Self::Full => "%A %B, %-d, %Y at %-I:%M%p",
        }
    }
}

/// Render a timestamp in the fixed API form.
pub fn api_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(API_TIMESTAMP_FORMAT).to_string()
}

/// Parse RFC 3339 or one of the naive form layouts (taken as UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TimeFormatError> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NAIVE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimeFormatError::Unparseable {
            value: value.to_owned(),
        })
}

/// Render a timestamp for display.
pub fn display(ts: &DateTime<Utc>, format: DateFormat) -> String {
    ts.format(format.pattern()).to_string()
}

/// Parse an ISO-8601 string and render it for display.
pub fn format_datetime(value: &str, format: DateFormat) -> Result<String, TimeFormatError> {
    parse_timestamp(value).map(|ts| display(&ts, format))
}
