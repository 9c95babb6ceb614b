//! Tab-separated report reader

use crate::error::{Error, Result};
use crate::types::RawRow;
use std::path::Path;
use tracing::debug;

/// Read and split a report file
pub fn read_report(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Report(format!("cannot read {}: {e}", path.display())))?;
    let rows = parse_report(&text);
    debug!(path = %path.display(), rows = rows.len(), "report read");
    Ok(rows)
}

/// Split report text into rows
///
/// No header row. Columns are date, project, task, type, description,
/// duration. Missing trailing columns read as empty; blank lines are skipped.
pub fn parse_report(text: &str) -> Vec<RawRow> {
    text.lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut cols = line.split('\t').map(ToString::to_string);
            let mut next = || cols.next().unwrap_or_default();
            RawRow {
                date: next(),
                project: next(),
                task: next(),
                kind: next(),
                description: next(),
                duration: next(),
            }
        })
        .collect()
}
