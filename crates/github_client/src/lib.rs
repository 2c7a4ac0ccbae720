//! Crate for interacting with the GitHub issues REST API.
//!
//! This crate provides a client for making token-authenticated requests to GitHub.
//! It exposes exactly the two operations needed to copy labels from an issue onto a
//! pull request: reading an issue and adding labels to an issue or pull request.

use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::{Octocrab, Result as OctocrabResult};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod label;
pub use label::{AddLabelsPayload, Label};

pub mod models;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Trait for the issue operations used by label propagation.
///
/// GitHub treats pull requests as issues for labelling purposes, so `issue_number`
/// may refer to either.
#[async_trait]
pub trait IssueClient: Send + Sync {
    /// Fetches a single issue, including its labels.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `issue_number` - The number of the issue.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the issue does not exist, `Error::AuthError` if the
    /// token is rejected, `Error::RateLimitExceeded` if GitHub throttles the request and
    /// `Error::ApiError` or `Error::InvalidResponse` for any other failure.
    async fn get_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
    ) -> Result<models::Issue, Error>;

    /// Adds labels to an issue or pull request.
    ///
    /// Labels already present are left untouched by GitHub; labels that do not yet
    /// exist in the repository are created by GitHub.
    ///
    /// # Errors
    ///
    /// Same conditions as [`IssueClient::get_issue`].
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> Result<(), Error>;
}

/// A client for interacting with the GitHub API, authenticated with a token.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an already configured `Octocrab` instance.
    ///
    /// See [`create_token_client`] for building the `Octocrab` instance.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IssueClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn get_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
    ) -> Result<models::Issue, Error> {
        let path = format!("/repos/{}/{}/issues/{}", owner, repo, issue_number);

        debug!("Making API call to: {}", path);
        let result: OctocrabResult<models::Issue> = self.client.get(path, None::<&()>).await;

        match result {
            Ok(issue) => {
                info!(
                    issue_number = issue.number,
                    label_count = issue.labels.len(),
                    "Retrieved issue"
                );
                Ok(issue)
            }
            Err(e) => {
                log_octocrab_error("Failed to get issue", &e);
                Err(classify_octocrab_error(e))
            }
        }
    }

    #[instrument(skip(self, labels), fields(owner = %owner, repo = %repo, label_count = labels.len()))]
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> Result<(), Error> {
        let path = format!("/repos/{}/{}/issues/{}/labels", owner, repo, issue_number);
        let payload = AddLabelsPayload { labels };

        debug!("Making API call to: {}", path);
        let result: OctocrabResult<Vec<Label>> = self.client.post(path, Some(&payload)).await;

        match result {
            Ok(applied) => {
                info!(
                    issue_number = issue_number,
                    applied_count = applied.len(),
                    "Added labels"
                );
                Ok(())
            }
            Err(e) => {
                log_octocrab_error("Failed to add labels", &e);
                Err(classify_octocrab_error(e))
            }
        }
    }
}

/// Creates an `Octocrab` client authenticated with a personal or workflow token.
///
/// # Arguments
///
/// * `token` - The token used for every request.
/// * `base_uri` - Optional REST API root, e.g. `https://ghe.example.com/api/v3` for
///   GitHub Enterprise Server. `None` uses `https://api.github.com`.
///
/// The client never retries a failed request.
///
/// # Errors
///
/// Returns `Error::AuthError` if the base URI is not a valid absolute URL or the
/// client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient, Error};
/// use secrecy::SecretString;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Error> {
///     let token = SecretString::from("ghp_example".to_string());
///     let octocrab = create_token_client(&token, None)?;
///     let client = GitHubClient::new(octocrab);
///     Ok(())
/// }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &SecretString, base_uri: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder()
        .personal_token(token.expose_secret().to_string())
        .add_retry_config(RetryConfig::None);

    if let Some(uri) = base_uri {
        let parsed = url::Url::parse(uri).map_err(|e| {
            error!(base_uri = uri, error = %e, "Invalid GitHub API base URI");
            Error::AuthError(format!("Invalid GitHub API base URI '{}': {}", uri, e))
        })?;

        debug!(base_uri = %parsed, "Using custom GitHub API base URI");
        builder = builder
            .base_uri(uri.trim_end_matches('/'))
            .map_err(|e| Error::AuthError(format!("Invalid GitHub API base URI: {}", e)))?;
    }

    builder.build().map_err(|e| {
        error!(error = ?e, "Failed to build Octocrab client with token credentials");
        Error::AuthError("Failed to build the GitHub client.".to_string())
    })
}

/// Maps an `octocrab` failure onto the crate error type.
fn classify_octocrab_error(e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let message = source.message.clone();
            match source.status_code.as_u16() {
                404 => Error::NotFound,
                429 => Error::RateLimitExceeded,
                403 if message.to_lowercase().contains("rate limit") => Error::RateLimitExceeded,
                401 | 403 => Error::AuthError(message),
                status => Error::ApiError { status, message },
            }
        }
        octocrab::Error::Serde { source, .. } => Error::Deserialization(source),
        octocrab::Error::Json { source, .. } => Error::Deserialization(source.into_inner()),
        other => Error::InvalidResponse(other.to_string()),
    }
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let err = source;
            error!(
                error_message = err.message,
                status = err.status_code.as_u16(),
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            )
        }
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
