//! Worklog construction and submission

use crate::error::{Error, Result};
use crate::tracker::TrackerService;
use crate::types::{Issue, ParsedEntry, WorklogReceipt, WorklogSubmission};
use chrono::NaiveTime;
use tracing::info;

/// Time of day every worklog starts at
///
/// Report entries are day-level; a fixed start keeps them independent of
/// the actual time of day.
pub const START_TIME: NaiveTime = match NaiveTime::from_hms_opt(15, 10, 15) {
    Some(t) => t,
    None => panic!("valid start time"),
};

/// Build the create-worklog request for an entry
pub fn build_submission(
    entry: &ParsedEntry,
    issue: &Issue,
    remaining_estimate_seconds: u64,
    worker: &str,
) -> Result<WorklogSubmission> {
    let date = entry
        .date
        .ok_or_else(|| Error::Internal(format!("entry for {} has no date", entry.task())))?;

    let comment = Some(entry.description())
        .filter(|d| !d.is_empty())
        .map(ToString::to_string);

    Ok(WorklogSubmission {
        task_key: issue.task_key.clone(),
        numeric_id: issue.numeric_id,
        started: date.and_time(START_TIME),
        duration_seconds: entry.duration_seconds(),
        remaining_estimate_seconds,
        comment,
        worker: worker.to_string(),
    })
}

/// Send one worklog; a single attempt, failures are returned as-is
pub async fn submit(
    tracker: &dyn TrackerService,
    submission: &WorklogSubmission,
) -> Result<WorklogReceipt> {
    let receipt = tracker.create_worklog(submission).await?;
    info!(
        task = %submission.task_key,
        started = %submission.started,
        seconds = submission.duration_seconds,
        status = receipt.status,
        "worklog created"
    );
    Ok(receipt)
}
