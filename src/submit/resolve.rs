//! Task key → issue id resolution

use crate::error::{Error, Result};
use crate::tracker::{IssuePageScraper, TrackerService};
use crate::types::Issue;
use std::collections::HashMap;
use tracing::debug;

/// Resolves task keys through the issue browse page
///
/// Successful lookups are cached for the lifetime of the resolver (one run).
pub struct IssueResolver<'a> {
    scraper: &'a dyn IssuePageScraper,
    display_user: &'a str,
    cache: HashMap<String, Issue>,
}

impl<'a> IssueResolver<'a> {
    /// Resolver matching logged time against `display_user` (lower-cased)
    pub fn new(scraper: &'a dyn IssuePageScraper, display_user: &'a str) -> Self {
        Self {
            scraper,
            display_user,
            cache: HashMap::new(),
        }
    }

    /// Look up an issue, fetching its page on the first request for the key
    pub async fn resolve(&mut self, tracker: &dyn TrackerService, task_key: &str) -> Result<Issue> {
        if let Some(issue) = self.cache.get(task_key) {
            debug!(task = task_key, id = issue.numeric_id, "issue id cached");
            return Ok(issue.clone());
        }

        let html = tracker.fetch_issue_page(task_key).await?;
        let numeric_id = self
            .scraper
            .resolve_issue_id(&html)
            .ok_or_else(|| Error::IssueNotFound(task_key.to_string()))?;
        let logged_minutes = self.scraper.read_logged_duration(&html, self.display_user);

        let issue = Issue {
            task_key: task_key.to_string(),
            numeric_id,
            logged_minutes,
        };
        debug!(task = task_key, id = numeric_id, ?logged_minutes, "issue resolved");

        self.cache.insert(task_key.to_string(), issue.clone());
        Ok(issue)
    }

    /// Number of cached issues
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
