//! Remaining estimate reconciliation
//!
//! The worklog endpoint needs an explicit remaining estimate. It is set to
//! the issue's current estimate minus the time about to be logged.

use crate::error::Result;
use crate::tracker::TrackerService;
use crate::types::Issue;
use tracing::debug;

/// Remaining estimate after logging `duration_seconds`; never below zero
pub const fn remaining_after(current_seconds: Option<u64>, duration_seconds: u64) -> u64 {
    match current_seconds {
        Some(current) => current.saturating_sub(duration_seconds),
        None => 0,
    }
}

/// Fetch the issue's estimate and compute the value to send
pub async fn reconcile(
    tracker: &dyn TrackerService,
    issue: &Issue,
    duration_seconds: u64,
) -> Result<u64> {
    let current = tracker
        .current_estimate(&issue.task_key, issue.numeric_id)
        .await?;
    let remaining = remaining_after(current, duration_seconds);
    debug!(
        task = %issue.task_key,
        ?current,
        duration_seconds,
        remaining,
        "estimate reconciled"
    );
    Ok(remaining)
}
