//! Per-entry outcomes and report lines

use crate::error::Error;
use crate::types::{ParsedEntry, WorklogReceipt, format_minutes};
use regex::Regex;
use std::sync::LazyLock;

/// Longest free text shown on a report line before truncation
pub const MAX_TEXT_CHARS: usize = 50;

/// Marker for entries whose issue id could not be found
pub const ISSUE_NOT_FOUND_MARKER: &str = "N/F";

/// Marker for failures without an HTTP status
pub const UNKNOWN_MARKER: &str = "XXX";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("hardcoded pattern is valid"));

/// Classification of a per-entry failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Tracker returned a non-success status
    Http(u16),
    /// Issue page had no numeric id
    IssueNotFound,
    /// Anything without an HTTP status
    Unknown,
}

impl FailureKind {
    /// Leading column of the report line
    pub fn marker(self) -> String {
        match self {
            Self::Http(status) => status.to_string(),
            Self::IssueNotFound => ISSUE_NOT_FOUND_MARKER.to_string(),
            Self::Unknown => UNKNOWN_MARKER.to_string(),
        }
    }
}

/// A classified per-entry failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    /// Classification
    pub kind: FailureKind,
    /// Diagnostic text, whitespace runs collapsed
    pub message: String,
}

impl From<Error> for EntryFailure {
    fn from(err: Error) -> Self {
        let (kind, message) = match err {
            Error::Http { status, body } => (FailureKind::Http(status), body),
            Error::IssueNotFound(key) => (
                FailureKind::IssueNotFound,
                Error::IssueNotFound(key).to_string(),
            ),
            other => (FailureKind::Unknown, other.to_string()),
        };
        Self {
            kind,
            message: collapse_whitespace(&message),
        }
    }
}

/// Result of processing one queued entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    /// Entry date, `DD-MMM-YYYY`
    pub date: String,
    /// Task key
    pub task: String,
    /// Logged minutes
    pub minutes: u32,
    /// Entry description
    pub description: String,
    /// Accepted receipt or classified failure
    pub result: std::result::Result<WorklogReceipt, EntryFailure>,
}

impl EntryOutcome {
    /// Outcome for `entry` with the given result
    pub fn new(
        entry: &ParsedEntry,
        result: std::result::Result<WorklogReceipt, EntryFailure>,
    ) -> Self {
        Self {
            date: entry.date_label(),
            task: entry.task().to_string(),
            minutes: entry.minutes(),
            description: entry.description().to_string(),
            result,
        }
    }

    /// Whether the worklog was accepted
    pub const fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Status code or failure marker
    pub fn status_label(&self) -> String {
        match &self.result {
            Ok(receipt) => receipt.status.to_string(),
            Err(failure) => failure.kind.marker(),
        }
    }

    /// Description on success, diagnostic on failure; truncated
    pub fn text(&self) -> String {
        match &self.result {
            Ok(_) => truncate(&self.description),
            Err(failure) => truncate(&failure.message),
        }
    }

    /// `status | date | task | duration | text`
    pub fn line(&self, layout: &ColumnLayout) -> String {
        [
            self.status_label(),
            self.date.clone(),
            format!("{:<w$}", self.task, w = layout.task_width),
            format!("{:<w$}", format_minutes(self.minutes), w = layout.duration_width),
            self.text(),
        ]
        .join(" | ")
    }
}

/// Column widths shared by all report lines of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Widest task key
    pub task_width: usize,
    /// Widest formatted duration
    pub duration_width: usize,
}

impl ColumnLayout {
    /// Widths fitting every entry in `queue`
    pub fn for_entries(queue: &[ParsedEntry]) -> Self {
        queue.iter().fold(Self::default(), |acc, entry| Self {
            task_width: acc.task_width.max(entry.task().chars().count()),
            duration_width: acc
                .duration_width
                .max(format_minutes(entry.minutes()).chars().count()),
        })
    }
}

/// Everything a run produced, in submission order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// One outcome per queued entry
    pub outcomes: Vec<EntryOutcome>,
}

impl RunReport {
    /// Accepted worklogs
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Failed entries
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Total minutes successfully logged
    pub fn logged_minutes(&self) -> u32 {
        self.outcomes
            .iter()
            .filter(|o| o.is_success())
            .map(|o| o.minutes)
            .sum()
    }
}

/// Cut text to [`MAX_TEXT_CHARS`] characters, marking the cut with ` ...`
pub fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_TEXT_CHARS {
        let head: String = text.chars().take(MAX_TEXT_CHARS).collect();
        format!("{head} ...")
    } else {
        text.to_string()
    }
}

/// Replace runs of two or more whitespace characters with one space
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}
