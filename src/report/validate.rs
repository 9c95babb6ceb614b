//! Row validation and partitioning

use crate::types::{ParsedEntry, RawRow, REPORT_DATE_FORMAT};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::debug;

/// Shortest loggable duration, in hours
const MIN_HOURS: f64 = 0.25;

/// Validated rows, split by validity, excluded projects already removed
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Rows ready for submission, in report order
    pub valid: Vec<ParsedEntry>,
    /// Rows with a bad date or duration, in report order
    pub invalid: Vec<ParsedEntry>,
}

/// Parse, validate, filter and partition report rows
///
/// `excluded_projects` must hold lower-cased keys. Exclusion happens before
/// partitioning, so excluded rows show up in neither list.
pub fn parse_and_validate(rows: Vec<RawRow>, excluded_projects: &HashSet<String>) -> Partition {
    let total = rows.len();
    let (valid, invalid): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .map(parse_row)
        .filter(|entry| !excluded_projects.contains(&entry.raw.project.trim().to_lowercase()))
        .partition(|entry| entry.is_valid);

    debug!(
        total,
        valid = valid.len(),
        invalid = invalid.len(),
        excluded = total - valid.len() - invalid.len(),
        "rows validated"
    );

    Partition { valid, invalid }
}

fn parse_row(raw: RawRow) -> ParsedEntry {
    let date = parse_date(&raw.date);
    let duration_minutes = parse_duration_minutes(&raw.duration);
    let is_date_valid = date.is_some();
    let is_duration_valid = duration_minutes.is_some();

    ParsedEntry {
        raw,
        date,
        duration_minutes,
        is_date_valid,
        is_duration_valid,
        is_valid: is_date_valid && is_duration_valid,
    }
}

/// Parse a `DD-MMM-YYYY` date; `None` unless it names a real calendar day
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), REPORT_DATE_FORMAT).ok()
}

/// Parse decimal hours into whole minutes
///
/// Valid iff finite, at least a quarter hour, and an exact multiple of a
/// quarter hour. Minutes are counted in a `u32`, so anything longer than
/// `u32::MAX` minutes (about 8 000 years) is rejected as well.
pub fn parse_duration_minutes(text: &str) -> Option<u32> {
    let hours: f64 = text.trim().parse().ok()?;
    let quarters = hours * 4.0;
    if !hours.is_finite() || hours < MIN_HOURS || quarters.fract() != 0.0 {
        return None;
    }
    let minutes = quarters * 15.0;
    if minutes > f64::from(u32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = minutes as u32;
    Some(minutes)
}
