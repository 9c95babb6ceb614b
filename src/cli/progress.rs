//! Shared CLI progress callback with styled output and a login spinner

use crate::cli::style::{Tone, err, invalid_row, mark_done, out, outcome_line, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;
use tempo_logger::auth::AuthState;
use tempo_logger::error::Error;
use tempo_logger::submit::{ColumnLayout, EntryOutcome, Phase, ProgressCallback};
use tempo_logger::types::ParsedEntry;

/// CLI progress callback that prints to stdout/stderr
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Create a progress printer
    pub const fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: &str) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(bar);
        }
    }

    fn update_spinner(&self, message: &str) {
        if let Ok(slot) = self.spinner.lock() {
            if let Some(bar) = slot.as_ref() {
                bar.set_message(message.to_string());
            }
        }
    }

    fn stop_spinner(&self) {
        if let Some(bar) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) {
            bar.finish_and_clear();
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Validating => {}
            Phase::Authenticating => self.start_spinner(&format!("{phase}...")),
            Phase::Processing => println!("{}...", out(Tone::Heading, phase)),
            Phase::Complete => self.stop_spinner(),
        }
    }

    async fn on_auth_state(&self, state: AuthState) {
        match state {
            AuthState::Authenticated => {
                self.stop_spinner();
                println!("{} {}", mark_done(), out(Tone::Heading, state));
            }
            AuthState::ProbeFailed => {
                self.update_spinner(&format!("{state}, logging in..."));
            }
            _ => self.update_spinner(&format!("{state}...")),
        }
    }

    async fn on_invalid_rows(&self, rows: &[ParsedEntry]) {
        if rows.is_empty() {
            return;
        }
        eprintln!("{}", err(Tone::Skipped, "Invalid rows:"));
        for row in rows {
            let json = serde_json::to_string(row).unwrap_or_else(|_| format!("{row:?}"));
            eprintln!("{}", invalid_row(json));
        }
        eprintln!();
    }

    async fn on_entry_started(&self, _entry: &ParsedEntry) {}

    async fn on_entry_finished(&self, outcome: &EntryOutcome, layout: &ColumnLayout) {
        println!("{}", outcome_line(outcome, layout));
    }

    async fn on_error(&self, _error: &Error) {
        // main reports the error once the command returns
        self.stop_spinner();
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}
