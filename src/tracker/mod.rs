//! Tracker access: HTTP client and issue page scraping
//!
//! Every network call the engine makes goes through [`TrackerService`], so
//! the submission logic can run against the real Jira/Tempo client or a test
//! double.

mod client;
mod scrape;

pub use client::{TrackerClient, TrackerUrls};
pub use scrape::{IssuePageScraper, RegexScraper, parse_logged_duration};

use crate::error::Result;
use crate::types::{WorklogReceipt, WorklogSubmission};
use async_trait::async_trait;

/// Tracker operations needed to log work
///
/// Implementations are immutable: a session token is attached by building a
/// new service with [`TrackerService::with_cookies`], never by mutating one.
#[async_trait]
pub trait TrackerService: Send + Sync {
    /// A copy of this service that sends the given cookies on every request
    fn with_cookies(&self, cookies: &str) -> Result<Box<dyn TrackerService>>;

    /// Log in and return the session cookies
    ///
    /// Fails with [`crate::error::AuthFailure::Credentials`] or
    /// [`crate::error::AuthFailure::Captcha`] when the tracker refuses.
    async fn login(&self, login: &str, password: &str) -> Result<String>;

    /// Whether the current session is accepted by the tracker
    async fn probe(&self) -> bool;

    /// HTML of the issue's browse page
    async fn fetch_issue_page(&self, task_key: &str) -> Result<String>;

    /// Current remaining estimate of an issue, in seconds
    ///
    /// `None` when the issue has no estimate.
    async fn current_estimate(&self, task_key: &str, issue_id: u64) -> Result<Option<u64>>;

    /// Create one worklog
    async fn create_worklog(&self, submission: &WorklogSubmission) -> Result<WorklogReceipt>;
}
