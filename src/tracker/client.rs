//! Jira + Tempo HTTP client

use crate::error::{AuthFailure, Error, Result};
use crate::tracker::TrackerService;
use crate::types::{WorklogReceipt, WorklogSubmission};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Timestamp format the worklog endpoint accepts
const STARTED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Endpoint URLs derived from the tracker base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerUrls {
    base: String,
}

impl TrackerUrls {
    /// URLs for a tracker at `base` (scheme + host, no trailing slash)
    pub fn new(base: &str) -> Result<Self> {
        let parsed = url::Url::parse(base)
            .map_err(|e| Error::Config(format!("invalid tracker url {base}: {e}")))?;
        if parsed.host_str().is_none() {
            return Err(Error::Config(format!("tracker url has no host: {base}")));
        }
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// Tracker origin, e.g. `https://jira.example.com`
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Login endpoint
    pub fn login(&self) -> String {
        format!("{}/rest/gadget/1.0/login", self.base)
    }

    /// Lightweight authenticated endpoint used to test a session
    pub fn probe(&self) -> String {
        format!("{}/rest/tempo-timesheets/3/private/config", self.base)
    }

    /// Issue browse page
    pub fn browse(&self, task_key: &str) -> String {
        format!("{}/browse/{}", self.base, urlencoding::encode(task_key))
    }

    /// Issue lookup returning only the estimate field
    pub fn estimate(&self, issue_id: u64) -> String {
        format!("{}/rest/api/2/issue/{issue_id}", self.base)
    }

    /// Worklog creation
    pub fn worklogs(&self) -> String {
        format!("{}/rest/tempo-timesheets/4/worklogs/", self.base)
    }
}

/// Tracker client using reqwest
///
/// Immutable once built. Attaching a session produces a new client.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    client: Client,
    urls: TrackerUrls,
    cookies: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    login_succeeded: bool,
    #[serde(default)]
    captcha_failure: bool,
}

#[derive(Deserialize)]
struct EstimateResponse {
    #[serde(default)]
    fields: EstimateFields,
}

#[derive(Deserialize, Default)]
struct EstimateFields {
    #[serde(default)]
    timeestimate: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateWorklogPayload<'a> {
    origin_task_id: u64,
    worker: &'a str,
    comment: Option<&'a str>,
    started: String,
    time_spent_seconds: u64,
    remaining_estimate: u64,
    end_date: Option<String>,
    include_non_working_days: bool,
    attributes: serde_json::Map<String, serde_json::Value>,
}

impl<'a> CreateWorklogPayload<'a> {
    fn from_submission(submission: &'a WorklogSubmission) -> Self {
        Self {
            origin_task_id: submission.numeric_id,
            worker: &submission.worker,
            comment: submission.comment.as_deref().filter(|c| !c.is_empty()),
            started: submission.started.format(STARTED_FORMAT).to_string(),
            time_spent_seconds: submission.duration_seconds,
            remaining_estimate: submission.remaining_estimate_seconds,
            end_date: None,
            include_non_working_days: false,
            attributes: serde_json::Map::new(),
        }
    }
}

impl TrackerClient {
    /// Client for `https://<host>` without a session
    pub fn new(host: &str) -> Result<Self> {
        Self::with_base_url(&format!("https://{host}"))
    }

    /// Client for an explicit base URL without a session
    pub fn with_base_url(base: &str) -> Result<Self> {
        let urls = TrackerUrls::new(base)?;
        Self::build(urls, None)
    }

    /// Endpoint URLs
    pub const fn urls(&self) -> &TrackerUrls {
        &self.urls
    }

    /// Cookies this client sends, if any
    pub fn cookies(&self) -> Option<&str> {
        self.cookies.as_deref()
    }

    fn build(urls: TrackerUrls, cookies: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(
            "x-requested-with",
            HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(header::ORIGIN, header_value(urls.base())?);
        if let Some(c) = &cookies {
            headers.insert(header::COOKIE, header_value(c)?);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            urls,
            cookies,
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Internal(format!("invalid header value: {e}")))
}

/// Turn a non-success response into [`Error::Http`]
async fn check_status(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(Error::Http {
        status: status.as_u16(),
        body,
    })
}

/// Join the `name=value` part of each `Set-Cookie` header
fn collect_cookies(headers: &HeaderMap) -> String {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

#[async_trait]
impl TrackerService for TrackerClient {
    fn with_cookies(&self, cookies: &str) -> Result<Box<dyn TrackerService>> {
        Ok(Box::new(Self::build(
            self.urls.clone(),
            Some(cookies.to_string()),
        )?))
    }

    async fn login(&self, login: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.urls.login())
            .form(&[
                ("os_username", login),
                ("os_password", password),
                ("os_cookie", "true"),
            ])
            .send()
            .await?;

        let status = res.status();
        let cookies = collect_cookies(res.headers());
        let body = res.text().await?;

        let Ok(parsed) = serde_json::from_str::<LoginResponse>(&body) else {
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        };

        if parsed.captcha_failure {
            return Err(Error::Auth(
                AuthFailure::Captcha,
                "You need to logout and login via the browser".to_string(),
            ));
        }
        if !parsed.login_succeeded {
            return Err(Error::Auth(
                AuthFailure::Credentials,
                format!("Status: {}. Body: {body}", status.as_u16()),
            ));
        }
        if cookies.is_empty() {
            warn!("login succeeded without Set-Cookie headers");
        }

        debug!(status = status.as_u16(), "login succeeded");
        Ok(cookies)
    }

    async fn probe(&self) -> bool {
        match self.client.get(self.urls.probe()).send().await {
            Ok(res) => {
                debug!(status = res.status().as_u16(), "session probe");
                res.status().is_success()
            }
            Err(e) => {
                debug!(error = %e, "session probe failed");
                false
            }
        }
    }

    async fn fetch_issue_page(&self, task_key: &str) -> Result<String> {
        let url = self.urls.browse(task_key);
        let res = self
            .client
            .get(&url)
            .header(header::REFERER, &url)
            .send()
            .await?;

        Ok(check_status(res).await?.text().await?)
    }

    async fn current_estimate(&self, task_key: &str, issue_id: u64) -> Result<Option<u64>> {
        let res = self
            .client
            .get(self.urls.estimate(issue_id))
            .header(header::REFERER, self.urls.browse(task_key))
            .query(&[("fields", "timeestimate")])
            .send()
            .await?;

        let body = check_status(res).await?.text().await?;
        match serde_json::from_str::<EstimateResponse>(&body) {
            Ok(parsed) => Ok(parsed
                .fields
                .timeestimate
                .map(|secs| u64::try_from(secs).unwrap_or(0))),
            Err(e) => {
                warn!(task = task_key, error = %e, "unreadable estimate, treating as empty");
                Ok(None)
            }
        }
    }

    async fn create_worklog(&self, submission: &WorklogSubmission) -> Result<WorklogReceipt> {
        let payload = CreateWorklogPayload::from_submission(submission);

        let res = self
            .client
            .post(self.urls.worklogs())
            .header(header::REFERER, self.urls.browse(&submission.task_key))
            .json(&payload)
            .send()
            .await?;

        let res = check_status(res).await?;
        Ok(WorklogReceipt {
            status: res.status().as_u16(),
        })
    }
}
