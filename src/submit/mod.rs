//! Sequential submission engine
//!
//! Handles logging validated report entries on the tracker:
//! 1. Queue - group entries by task, keeping report order
//! 2. Resolve - map each task key to the tracker's issue id
//! 3. Reconcile - compute the remaining estimate to send
//! 4. Submit - create the worklog and record the outcome

mod estimate;
mod execute;
mod outcome;
mod progress;
mod queue;
mod resolve;
mod worklog;

pub use estimate::{reconcile, remaining_after};
pub use execute::{RunContext, process_queue, report_dry_run, run_submission};
pub use outcome::{
    ColumnLayout, EntryFailure, EntryOutcome, FailureKind, ISSUE_NOT_FOUND_MARKER, RunReport,
    UNKNOWN_MARKER, collapse_whitespace, truncate,
};
pub use progress::{NoopProgress, Phase, ProgressCallback};
pub use queue::build_queue;
pub use resolve::IssueResolver;
pub use worklog::{START_TIME, build_submission, submit};
