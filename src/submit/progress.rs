//! Progress callback trait for interface-agnostic updates
//!
//! The CLI prints styled lines; tests record or ignore the events.

use crate::auth::AuthState;
use crate::error::Error;
use crate::submit::{ColumnLayout, EntryOutcome};
use crate::types::ParsedEntry;
use async_trait::async_trait;

/// Run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reporting rows that failed validation
    Validating,
    /// Establishing a tracker session
    Authenticating,
    /// Submitting queued entries one by one
    Processing,
    /// All entries handled
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validating => write!(f, "Validating"),
            Self::Authenticating => write!(f, "Authenticating"),
            Self::Processing => write!(f, "Logging work"),
            Self::Complete => write!(f, "Done"),
        }
    }
}

/// Progress callback trait
///
/// Implement this trait to receive progress updates during a run.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called on every authentication state transition
    async fn on_auth_state(&self, state: AuthState);

    /// Called once with all rows that failed validation (may be empty)
    async fn on_invalid_rows(&self, rows: &[ParsedEntry]);

    /// Called before an entry's first network call
    async fn on_entry_started(&self, entry: &ParsedEntry);

    /// Called exactly once per queued entry
    async fn on_entry_finished(&self, outcome: &EntryOutcome, layout: &ColumnLayout);

    /// Called when a fatal error ends the run
    async fn on_error(&self, error: &Error);

    /// Called with a general status message
    async fn on_message(&self, message: &str);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_auth_state(&self, _state: AuthState) {}
    async fn on_invalid_rows(&self, _rows: &[ParsedEntry]) {}
    async fn on_entry_started(&self, _entry: &ParsedEntry) {}
    async fn on_entry_finished(&self, _outcome: &EntryOutcome, _layout: &ColumnLayout) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
