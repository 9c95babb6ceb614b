//! Core types for tempo-logger

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by the report file and the outcome lines
pub const REPORT_DATE_FORMAT: &str = "%d-%b-%Y";

/// A report row exactly as read from the file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawRow {
    /// Date, `DD-MMM-YYYY`
    pub date: String,
    /// Project key
    pub project: String,
    /// Tracker issue key, e.g. `ABC-123`
    pub task: String,
    /// Work type (informational)
    #[serde(rename = "type")]
    pub kind: String,
    /// Free text; becomes the worklog comment
    pub description: String,
    /// Decimal hours, e.g. `1.25`
    pub duration: String,
}

/// A row after parsing and validation
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParsedEntry {
    /// Source row
    #[serde(flatten)]
    pub raw: RawRow,
    /// Parsed calendar date
    #[serde(rename = "parsedDate")]
    pub date: Option<NaiveDate>,
    /// Duration in minutes; always a multiple of 15 when present
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: Option<u32>,
    /// Whether the date named an existing calendar day
    #[serde(rename = "isDateValid")]
    pub is_date_valid: bool,
    /// Whether the duration is a positive quarter-hour multiple
    #[serde(rename = "isDurationValid")]
    pub is_duration_valid: bool,
    /// `is_date_valid && is_duration_valid`
    #[serde(rename = "isValid")]
    pub is_valid: bool,
}

impl ParsedEntry {
    /// Task key
    pub fn task(&self) -> &str {
        &self.raw.task
    }

    /// Description text
    pub fn description(&self) -> &str {
        &self.raw.description
    }

    /// Duration in minutes; zero for invalid entries
    pub fn minutes(&self) -> u32 {
        self.duration_minutes.unwrap_or(0)
    }

    /// Duration in seconds; zero for invalid entries
    pub fn duration_seconds(&self) -> u64 {
        u64::from(self.minutes()) * 60
    }

    /// Date in report format, or the raw text when it did not parse
    pub fn date_label(&self) -> String {
        self.date.map_or_else(
            || self.raw.date.clone(),
            |d| d.format(REPORT_DATE_FORMAT).to_string(),
        )
    }
}

/// A tracker issue resolved from its browse page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Human-facing key, e.g. `ABC-123`
    pub task_key: String,
    /// Internal numeric id
    pub numeric_id: u64,
    /// Minutes already logged by the configured user, when the page shows it
    pub logged_minutes: Option<u32>,
}

/// Everything needed for one create-worklog call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorklogSubmission {
    /// Issue key (used for the Referer header)
    pub task_key: String,
    /// Internal issue id
    pub numeric_id: u64,
    /// Start instant, local time without offset
    pub started: chrono::NaiveDateTime,
    /// Time spent
    pub duration_seconds: u64,
    /// Remaining estimate to record on the issue
    pub remaining_estimate_seconds: u64,
    /// Worklog comment; `None` when the description was empty
    pub comment: Option<String>,
    /// Tracker username the time is logged for
    pub worker: String,
}

/// Accepted create-worklog response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorklogReceipt {
    /// HTTP status of the create call
    pub status: u16,
}

/// Format minutes as `Xh Ym`
pub fn format_minutes(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
