//! Test data factories for tempo-logger types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use tempo_logger::auth::AuthState;
use tempo_logger::config::Config;
use tempo_logger::error::Error;
use tempo_logger::report::{Partition, parse_and_validate, parse_report};
use tempo_logger::submit::{ColumnLayout, EntryOutcome, Phase, ProgressCallback};
use tempo_logger::types::ParsedEntry;

/// Config with test credentials and the given excluded projects
pub fn make_config(exclude: &str) -> Config {
    Config::from_lookup(|key| {
        let value = match key {
            "JIRA_HOST" => "jira.example.com",
            "JIRA_LOGIN" => "jdoe",
            "JIRA_PASSWORD" => "hunter2",
            "JIRA_USER_NAME" => "john.doe",
            "JIRA_USER_NAME_HUMAN" => "John Doe",
            "EXCLUDE_PROJECTS" => exclude,
            _ => return None,
        };
        Some(value.to_string())
    })
    .unwrap()
}

/// One tab-separated report line
pub fn report_line(date: &str, project: &str, task: &str, description: &str, hours: &str) -> String {
    format!("{date}\t{project}\t{task}\tDevelopment\t{description}\t{hours}")
}

/// Parse and validate report text with no excluded projects
pub fn make_partition(lines: &[String]) -> Partition {
    parse_and_validate(parse_report(&lines.join("\n")), &HashSet::new())
}

/// Valid entries from report lines
pub fn make_entries(lines: &[String]) -> Vec<ParsedEntry> {
    make_partition(lines).valid
}

/// Browse page exposing a numeric issue id
pub fn issue_page(issue_id: u64) -> String {
    format!(
        r#"<html><body><div id="issue-content" data-issue-id="{issue_id}"></div></body></html>"#
    )
}

/// Browse page with a Tempo panel listing time logged by `user`
pub fn issue_page_with_logged(issue_id: u64, user: &str, logged: &str) -> String {
    format!(
        r#"<html><body>
<div id="issue-content" data-issue-id="{issue_id}"></div>
<div id="peoplemodule"><dl><dt>Assignee:</dt><dd><span>{user}</span></dd></dl></div>
<div class="tempo tt_inner">
  <dl><dt>{user}</dt><dd><span>{logged}</span></dd></dl>
</div>
</body></html>"#
    )
}

/// Progress event as seen by a test
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Phase(Phase),
    Auth(AuthState),
    InvalidRows(usize),
    Started(String),
    Finished(String),
    Error(String),
    Message(String),
}

/// Progress callback that records every event
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Event>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn auth_states(&self) -> Vec<AuthState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Auth(state) => Some(state),
                _ => None,
            })
            .collect()
    }

    pub fn finished_lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Finished(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.push(Event::Phase(phase));
    }

    async fn on_auth_state(&self, state: AuthState) {
        self.push(Event::Auth(state));
    }

    async fn on_invalid_rows(&self, rows: &[ParsedEntry]) {
        self.push(Event::InvalidRows(rows.len()));
    }

    async fn on_entry_started(&self, entry: &ParsedEntry) {
        self.push(Event::Started(entry.task().to_string()));
    }

    async fn on_entry_finished(&self, outcome: &EntryOutcome, layout: &ColumnLayout) {
        self.push(Event::Finished(outcome.line(layout)));
    }

    async fn on_error(&self, error: &Error) {
        self.push(Event::Error(error.to_string()));
    }

    async fn on_message(&self, message: &str) {
        self.push(Event::Message(message.to_string()));
    }
}
