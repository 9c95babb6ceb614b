//! Mock tracker service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tempo_logger::error::{AuthFailure, Error, Result};
use tempo_logger::tracker::TrackerService;
use tempo_logger::types::{WorklogReceipt, WorklogSubmission};

/// Cookies handed out by a successful mock login
pub const FRESH_COOKIES: &str = "JSESSIONID=fresh; atlassian.xsrf.token=abc";

/// How the mock answers a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginMode {
    /// Return these cookies
    Succeed(String),
    /// Reject the credentials
    RejectCredentials,
    /// Demand a captcha
    RequireCaptcha,
}

#[derive(Debug)]
struct State {
    calls: Vec<String>,
    valid_cookies: HashSet<String>,
    login: LoginMode,
    accept_fresh_sessions: bool,
    pages: HashMap<String, String>,
    estimates: HashMap<u64, Option<u64>>,
    estimate_failures: HashMap<u64, (u16, String)>,
    worklog_failures: HashMap<String, (u16, String)>,
    submissions: Vec<WorklogSubmission>,
}

/// Hand-written `TrackerService` double
///
/// Clones made by `with_cookies` share call tracking and responses with the
/// instance they came from, so tests can inspect everything through it.
///
/// Features:
/// - Call log in request order (`login`, `probe:<cookies>`, `page:<key>`, ...)
/// - Configurable pages and estimates per issue
/// - Estimates follow submitted worklogs, like the real tracker
/// - Error injection per issue
#[derive(Debug, Clone)]
pub struct MockTracker {
    cookies: Option<String>,
    state: Arc<Mutex<State>>,
}

impl Default for MockTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTracker {
    /// Session-less mock whose login succeeds with [`FRESH_COOKIES`]
    pub fn new() -> Self {
        Self {
            cookies: None,
            state: Arc::new(Mutex::new(State {
                calls: Vec::new(),
                valid_cookies: HashSet::new(),
                login: LoginMode::Succeed(FRESH_COOKIES.to_string()),
                accept_fresh_sessions: true,
                pages: HashMap::new(),
                estimates: HashMap::new(),
                estimate_failures: HashMap::new(),
                worklog_failures: HashMap::new(),
                submissions: Vec::new(),
            })),
        }
    }

    // === Configuration ===

    /// Accept `cookies` on probe
    pub fn accept_cookies(&self, cookies: &str) {
        self.state
            .lock()
            .unwrap()
            .valid_cookies
            .insert(cookies.to_string());
    }

    /// Set how login answers
    pub fn set_login(&self, mode: LoginMode) {
        self.state.lock().unwrap().login = mode;
    }

    /// Make the probe reject cookies obtained by a fresh login
    pub fn reject_fresh_sessions(&self) {
        self.state.lock().unwrap().accept_fresh_sessions = false;
    }

    /// Serve `html` as the browse page of `task_key`
    pub fn set_page(&self, task_key: &str, html: &str) {
        self.state
            .lock()
            .unwrap()
            .pages
            .insert(task_key.to_string(), html.to_string());
    }

    /// Current remaining estimate of an issue
    pub fn set_estimate(&self, issue_id: u64, seconds: Option<u64>) {
        self.state
            .lock()
            .unwrap()
            .estimates
            .insert(issue_id, seconds);
    }

    /// Make the estimate request for an issue fail with an HTTP error
    pub fn fail_estimate(&self, issue_id: u64, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .estimate_failures
            .insert(issue_id, (status, body.to_string()));
    }

    /// Make worklog creation for a task fail with an HTTP error
    pub fn fail_worklog(&self, task_key: &str, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .worklog_failures
            .insert(task_key.to_string(), (status, body.to_string()));
    }

    // === Call verification ===

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of calls starting with `prefix`
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Accepted worklog submissions, in order
    pub fn submissions(&self) -> Vec<WorklogSubmission> {
        self.state.lock().unwrap().submissions.clone()
    }

    /// Latest remaining estimate recorded for an issue
    pub fn estimate(&self, issue_id: u64) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .estimates
            .get(&issue_id)
            .copied()
            .flatten()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl TrackerService for MockTracker {
    fn with_cookies(&self, cookies: &str) -> Result<Box<dyn TrackerService>> {
        Ok(Box::new(Self {
            cookies: Some(cookies.to_string()),
            state: Arc::clone(&self.state),
        }))
    }

    async fn login(&self, login: &str, _password: &str) -> Result<String> {
        self.record(format!("login:{login}"));
        let mut state = self.state.lock().unwrap();
        match state.login.clone() {
            LoginMode::Succeed(cookies) => {
                if state.accept_fresh_sessions {
                    state.valid_cookies.insert(cookies.clone());
                }
                Ok(cookies)
            }
            LoginMode::RejectCredentials => Err(Error::Auth(
                AuthFailure::Credentials,
                "Status: 200. Body: {\"loginSucceeded\":false}".to_string(),
            )),
            LoginMode::RequireCaptcha => Err(Error::Auth(
                AuthFailure::Captcha,
                "You need to logout and login via the browser".to_string(),
            )),
        }
    }

    async fn probe(&self) -> bool {
        let cookies = self.cookies.clone().unwrap_or_default();
        self.record(format!("probe:{cookies}"));
        self.state.lock().unwrap().valid_cookies.contains(&cookies)
    }

    async fn fetch_issue_page(&self, task_key: &str) -> Result<String> {
        self.record(format!("page:{task_key}"));
        self.state
            .lock()
            .unwrap()
            .pages
            .get(task_key)
            .cloned()
            .ok_or_else(|| Error::Http {
                status: 404,
                body: format!("no page for {task_key}"),
            })
    }

    async fn current_estimate(&self, _task_key: &str, issue_id: u64) -> Result<Option<u64>> {
        self.record(format!("estimate:{issue_id}"));
        let state = self.state.lock().unwrap();
        if let Some((status, body)) = state.estimate_failures.get(&issue_id) {
            return Err(Error::Http {
                status: *status,
                body: body.clone(),
            });
        }
        Ok(state.estimates.get(&issue_id).copied().flatten())
    }

    async fn create_worklog(&self, submission: &WorklogSubmission) -> Result<WorklogReceipt> {
        self.record(format!("worklog:{}", submission.task_key));
        let mut state = self.state.lock().unwrap();
        if let Some((status, body)) = state.worklog_failures.get(&submission.task_key) {
            return Err(Error::Http {
                status: *status,
                body: body.clone(),
            });
        }
        state.estimates.insert(
            submission.numeric_id,
            Some(submission.remaining_estimate_seconds),
        );
        state.submissions.push(submission.clone());
        Ok(WorklogReceipt { status: 200 })
    }
}
