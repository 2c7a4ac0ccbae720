//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// --- Test Constants ---
const TEST_OWNER: &str = "test-owner";
const TEST_REPO: &str = "test-repo";
const TEST_TOKEN: &str = "ghp_test_token_value";

fn create_test_client(mock_server: &MockServer) -> GitHubClient {
    let token = SecretString::from(TEST_TOKEN.to_string());
    let octocrab =
        create_token_client(&token, Some(&mock_server.uri())).expect("Failed to build client");
    GitHubClient::new(octocrab)
}

fn github_error_body(message: &str) -> serde_json::Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest"
    })
}

#[tokio::test]
async fn test_get_issue_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_OWNER}/{TEST_REPO}/issues/5")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "number": 5,
            "title": "Make the widget faster",
            "state": "open",
            "labels": [
                { "id": 11, "name": "LS-stale", "color": "cccccc" },
                { "id": 12, "name": "enhancement", "color": "a2eeef" }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_issue(TEST_OWNER, TEST_REPO, 5).await;

    if let Err(e) = &result {
        eprintln!("get_issue error: {e:?}");
    }
    let issue = result.expect("Expected the issue to be returned");
    assert_eq!(issue.number, 5);
    assert_eq!(
        issue.label_names().collect::<Vec<_>>(),
        vec!["LS-stale", "enhancement"]
    );
}

#[tokio::test]
async fn test_get_issue_undecodable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_OWNER}/{TEST_REPO}/issues/5")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": "five",
            "labels": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_issue(TEST_OWNER, TEST_REPO, 5).await;

    assert!(
        matches!(result, Err(Error::Deserialization(_))),
        "Expected Deserialization, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_get_issue_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_OWNER}/{TEST_REPO}/issues/404")))
        .respond_with(ResponseTemplate::new(404).set_body_json(github_error_body("Not Found")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_issue(TEST_OWNER, TEST_REPO, 404).await;

    assert!(matches!(result, Err(Error::NotFound)), "got {result:?}");
}

#[tokio::test]
async fn test_get_issue_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_OWNER}/{TEST_REPO}/issues/1")))
        .respond_with(ResponseTemplate::new(401).set_body_json(github_error_body("Bad credentials")))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_issue(TEST_OWNER, TEST_REPO, 1).await;

    match result {
        Err(Error::AuthError(msg)) => assert_eq!(msg, "Bad credentials"),
        other => panic!("Expected AuthError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_issue_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_OWNER}/{TEST_REPO}/issues/1")))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(github_error_body("API rate limit exceeded for installation.")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_issue(TEST_OWNER, TEST_REPO, 1).await;

    assert!(
        matches!(result, Err(Error::RateLimitExceeded)),
        "got {result:?}"
    );
}

#[tokio::test]
async fn test_get_issue_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{TEST_OWNER}/{TEST_REPO}/issues/1")))
        .respond_with(ResponseTemplate::new(502).set_body_json(github_error_body("Bad Gateway")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_issue(TEST_OWNER, TEST_REPO, 1).await;

    match result {
        Err(Error::ApiError { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_issue_unreachable_host() {
    let token = SecretString::from(TEST_TOKEN.to_string());
    let octocrab =
        create_token_client(&token, Some("http://127.0.0.1:1")).expect("Failed to build client");
    let client = GitHubClient::new(octocrab);

    let result = client.get_issue(TEST_OWNER, TEST_REPO, 1).await;

    assert!(
        matches!(result, Err(Error::InvalidResponse(_))),
        "got {result:?}"
    );
}

#[tokio::test]
async fn test_add_labels_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/repos/{TEST_OWNER}/{TEST_REPO}/issues/12/labels")))
        .and(body_json(json!({ "labels": ["bug", "enhancement"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "bug", "color": "f29513" },
            { "id": 2, "name": "enhancement", "color": "a2eeef" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let labels = vec!["bug".to_string(), "enhancement".to_string()];

    let result = client.add_labels(TEST_OWNER, TEST_REPO, 12, &labels).await;

    if let Err(e) = &result {
        eprintln!("add_labels error: {e:?}");
    }
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_add_labels_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/repos/{TEST_OWNER}/{TEST_REPO}/issues/12/labels")))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(github_error_body("Resource not accessible by integration")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let labels = vec!["bug".to_string()];

    let result = client.add_labels(TEST_OWNER, TEST_REPO, 12, &labels).await;

    match result {
        Err(Error::AuthError(msg)) => assert_eq!(msg, "Resource not accessible by integration"),
        other => panic!("Expected AuthError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_token_client_rejects_invalid_base_uri() {
    let token = SecretString::from(TEST_TOKEN.to_string());

    let result = create_token_client(&token, Some("not a url"));

    assert!(matches!(result, Err(Error::AuthError(_))));
}

#[tokio::test]
async fn test_create_token_client_default_base_uri() {
    let token = SecretString::from(TEST_TOKEN.to_string());

    let result = create_token_client(&token, None);

    assert!(result.is_ok());
}
