//! HTTP client tests against a local mock server

use chrono::NaiveDate;
use mockito::Matcher;
use serde_json::json;
use tempo_logger::error::{AuthFailure, Error};
use tempo_logger::submit::START_TIME;
use tempo_logger::tracker::{TrackerClient, TrackerService};
use tempo_logger::types::WorklogSubmission;

fn submission(comment: Option<&str>) -> WorklogSubmission {
    WorklogSubmission {
        task_key: "ABC-1".to_string(),
        numeric_id: 101,
        started: NaiveDate::from_ymd_opt(2019, 3, 29)
            .unwrap()
            .and_time(START_TIME),
        duration_seconds: 4500,
        remaining_estimate_seconds: 2700,
        comment: comment.map(ToString::to_string),
        worker: "john.doe".to_string(),
    }
}

#[tokio::test]
async fn login_posts_form_and_collects_cookies() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/gadget/1.0/login")
        .match_header("x-requested-with", "XMLHttpRequest")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("os_username".into(), "jdoe".into()),
            Matcher::UrlEncoded("os_password".into(), "p@ss word".into()),
            Matcher::UrlEncoded("os_cookie".into(), "true".into()),
        ]))
        .with_status(200)
        .with_header("set-cookie", "JSESSIONID=abc; Path=/; HttpOnly")
        .with_header("set-cookie", "atlassian.xsrf.token=xyz; Path=/")
        .with_body(r#"{"loginSucceeded":true,"captchaFailure":false}"#)
        .create_async()
        .await;

    let client = TrackerClient::with_base_url(&server.url()).unwrap();
    let cookies = client.login("jdoe", "p@ss word").await.unwrap();

    mock.assert_async().await;
    assert_eq!(cookies, "JSESSIONID=abc; atlassian.xsrf.token=xyz");
}

#[tokio::test]
async fn login_captcha_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/rest/gadget/1.0/login")
        .with_status(200)
        .with_body(r#"{"loginSucceeded":false,"captchaFailure":true}"#)
        .create_async()
        .await;

    let client = TrackerClient::with_base_url(&server.url()).unwrap();
    let err = client.login("jdoe", "x").await.unwrap_err();

    assert!(matches!(err, Error::Auth(AuthFailure::Captcha, _)));
}

#[tokio::test]
async fn login_rejection_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/rest/gadget/1.0/login")
        .with_status(200)
        .with_body(r#"{"loginSucceeded":false}"#)
        .create_async()
        .await;

    let client = TrackerClient::with_base_url(&server.url()).unwrap();
    let err = client.login("jdoe", "x").await.unwrap_err();

    match err {
        Error::Auth(AuthFailure::Credentials, detail) => {
            assert!(detail.starts_with("Status: 200."));
            assert!(detail.contains("loginSucceeded"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn probe_sends_session_cookies() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/tempo-timesheets/3/private/config")
        .match_header("cookie", "JSESSIONID=good")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    server
        .mock("GET", "/rest/tempo-timesheets/3/private/config")
        .match_header("cookie", "JSESSIONID=bad")
        .with_status(401)
        .create_async()
        .await;

    let client = TrackerClient::with_base_url(&server.url()).unwrap();

    assert!(client.with_cookies("JSESSIONID=good").unwrap().probe().await);
    assert!(!client.with_cookies("JSESSIONID=bad").unwrap().probe().await);
}

#[tokio::test]
async fn issue_page_errors_keep_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/browse/ABC-404")
        .with_status(404)
        .with_body("<html>Issue Does Not Exist</html>")
        .create_async()
        .await;

    let client = TrackerClient::with_base_url(&server.url()).unwrap();
    let err = client.fetch_issue_page("ABC-404").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn estimate_requests_only_the_estimate_field() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/api/2/issue/101")
        .match_query(Matcher::UrlEncoded("fields".into(), "timeestimate".into()))
        .with_status(200)
        .with_body(r#"{"fields":{"timeestimate":7200}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/rest/api/2/issue/102")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"fields":{"timeestimate":null}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/rest/api/2/issue/103")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = TrackerClient::with_base_url(&server.url()).unwrap();

    assert_eq!(client.current_estimate("ABC-1", 101).await.unwrap(), Some(7200));
    assert_eq!(client.current_estimate("ABC-2", 102).await.unwrap(), None);
    assert_eq!(client.current_estimate("ABC-3", 103).await.unwrap(), None);
    mock.assert_async().await;
}

#[tokio::test]
async fn worklog_body_matches_tempo_contract() {
    let mut server = mockito::Server::new_async().await;
    let referer = format!("{}/browse/ABC-1", server.url());
    let mock = server
        .mock("POST", "/rest/tempo-timesheets/4/worklogs/")
        .match_header("referer", referer.as_str())
        .match_body(Matcher::Json(json!({
            "originTaskId": 101,
            "worker": "john.doe",
            "comment": "Fix bug",
            "started": "2019-03-29T15:10:15.000",
            "timeSpentSeconds": 4500,
            "remainingEstimate": 2700,
            "endDate": null,
            "includeNonWorkingDays": false,
            "attributes": {}
        })))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = TrackerClient::with_base_url(&server.url()).unwrap();
    let receipt = client
        .create_worklog(&submission(Some("Fix bug")))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(receipt.status, 200);
}

#[tokio::test]
async fn worklog_rejection_returns_http_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/rest/tempo-timesheets/4/worklogs/")
        .with_status(400)
        .with_body(r#"{"errors":{"started":"bad date"}}"#)
        .create_async()
        .await;

    let client = TrackerClient::with_base_url(&server.url()).unwrap();
    let err = client.create_worklog(&submission(None)).await.unwrap_err();

    match err {
        Error::Http { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("bad date"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
