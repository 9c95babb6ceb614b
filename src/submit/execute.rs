//! Run coordination
//!
//! Authenticates once, then walks the queue one entry at a time:
//! resolve issue → reconcile estimate → create worklog → report outcome.
//! Nothing here runs concurrently; each network call is awaited before the
//! next one starts, so estimates are always read after the previous worklog
//! on the same issue has landed.

use crate::auth::authenticate;
use crate::config::Config;
use crate::error::Result;
use crate::report::Partition;
use crate::session::SessionStore;
use crate::submit::estimate::reconcile;
use crate::submit::outcome::{ColumnLayout, EntryFailure, EntryOutcome, RunReport};
use crate::submit::resolve::IssueResolver;
use crate::submit::worklog::{build_submission, submit};
use crate::submit::{Phase, ProgressCallback, build_queue};
use crate::tracker::{IssuePageScraper, TrackerService};
use crate::types::{ParsedEntry, WorklogReceipt, format_minutes};
use tracing::{debug, info, warn};

/// Collaborators for one run
pub struct RunContext<'a> {
    /// Validated configuration
    pub config: &'a Config,
    /// Persisted session storage
    pub store: &'a dyn SessionStore,
    /// Session-less tracker client
    pub tracker: &'a dyn TrackerService,
    /// Issue page scraper
    pub scraper: &'a dyn IssuePageScraper,
    /// Progress sink
    pub progress: &'a dyn ProgressCallback,
}

/// Full run: report invalid rows, authenticate, process every valid entry
///
/// Only authentication (and session storage) errors are returned; per-entry
/// failures end up in the [`RunReport`].
pub async fn run_submission(partition: Partition, ctx: &RunContext<'_>) -> Result<RunReport> {
    ctx.progress.on_phase(Phase::Validating).await;
    ctx.progress.on_invalid_rows(&partition.invalid).await;

    let queue = build_queue(partition.valid);
    if queue.is_empty() {
        ctx.progress.on_message("Nothing to log").await;
        ctx.progress.on_phase(Phase::Complete).await;
        return Ok(RunReport::default());
    }

    ctx.progress.on_phase(Phase::Authenticating).await;
    let session = match authenticate(ctx.config, ctx.store, ctx.tracker, ctx.progress).await {
        Ok(session) => session,
        Err(e) => {
            ctx.progress.on_error(&e).await;
            return Err(e);
        }
    };
    info!(source = ?session.source, entries = queue.len(), "tracker session ready");

    let report = process_queue(
        &queue,
        session.tracker.as_ref(),
        ctx.scraper,
        ctx.config,
        ctx.progress,
    )
    .await;

    ctx.progress.on_phase(Phase::Complete).await;
    Ok(report)
}

/// Submit queued entries strictly in order
///
/// Every entry yields exactly one outcome. A failing entry is reported and
/// the loop moves on to the next one.
pub async fn process_queue(
    queue: &[ParsedEntry],
    tracker: &dyn TrackerService,
    scraper: &dyn IssuePageScraper,
    config: &Config,
    progress: &dyn ProgressCallback,
) -> RunReport {
    progress.on_phase(Phase::Processing).await;

    let layout = ColumnLayout::for_entries(queue);
    let mut resolver = IssueResolver::new(scraper, &config.user_name_human);
    let mut report = RunReport::default();

    for entry in queue {
        progress.on_entry_started(entry).await;

        let result = process_entry(entry, tracker, &mut resolver, &config.user_name)
            .await
            .map_err(|e| {
                warn!(task = entry.task(), error = %e, "entry failed");
                EntryFailure::from(e)
            });

        let outcome = EntryOutcome::new(entry, result);
        progress.on_entry_finished(&outcome, &layout).await;
        report.outcomes.push(outcome);
    }

    debug!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        issues = resolver.cached(),
        "queue processed"
    );
    report
}

async fn process_entry(
    entry: &ParsedEntry,
    tracker: &dyn TrackerService,
    resolver: &mut IssueResolver<'_>,
    worker: &str,
) -> Result<WorklogReceipt> {
    let issue = resolver.resolve(tracker, entry.task()).await?;
    if let Some(logged) = issue.logged_minutes {
        debug!(
            task = entry.task(),
            already_logged = %format_minutes(logged),
            adding = %format_minutes(entry.minutes()),
            "logged time on issue"
        );
    }

    let remaining = reconcile(tracker, &issue, entry.duration_seconds()).await?;
    let submission = build_submission(entry, &issue, remaining, worker)?;
    submit(tracker, &submission).await
}

/// Report what would be logged without touching the tracker
pub async fn report_dry_run(
    partition: Partition,
    progress: &dyn ProgressCallback,
) -> Vec<ParsedEntry> {
    progress.on_phase(Phase::Validating).await;
    progress.on_invalid_rows(&partition.invalid).await;

    let queue = build_queue(partition.valid);
    if queue.is_empty() {
        progress.on_message("Nothing to log").await;
        return queue;
    }

    let layout = ColumnLayout::for_entries(&queue);
    progress.on_message("Would log:").await;
    for entry in &queue {
        progress
            .on_message(&format!(
                "  - {} | {:<tw$} | {:<dw$} | {}",
                entry.date_label(),
                entry.task(),
                format_minutes(entry.minutes()),
                entry.description(),
                tw = layout.task_width,
                dw = layout.duration_width,
            ))
            .await;
    }

    queue
}
