//! Pull request event input.
//!
//! The CI platform hands the run a JSON payload describing the pull request that
//! triggered it. This module turns that payload into a [`PullRequestEvent`] and
//! rejects payloads that lack the fields the propagation depends on.

use serde::Deserialize;
use tracing::debug;

use crate::errors::InvalidEventError;

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

/// The pull request that triggered a propagation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    /// Pull request number, always greater than zero
    pub number: u64,
    /// Pull request description, `None` when the description is empty
    pub body: Option<String>,
    /// Owner (user or organization) of the repository
    pub repository_owner: String,
    /// Name of the repository
    pub repository_name: String,
}

impl PullRequestEvent {
    /// Creates an event from already validated parts.
    pub fn new(
        number: u64,
        body: Option<String>,
        repository_owner: impl Into<String>,
        repository_name: impl Into<String>,
    ) -> Self {
        Self {
            number,
            body,
            repository_owner: repository_owner.into(),
            repository_name: repository_name.into(),
        }
    }

    /// Parses a `pull_request` webhook payload.
    ///
    /// The repository is taken from `repository.owner.login` and `repository.name`.
    /// When the payload does not carry them, `fallback_repository` is used instead;
    /// it must be an `owner/name` slug such as the value of `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidEventError`] naming the first field that is missing or
    /// malformed. A missing or `null` `pull_request.body` is not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use label_propagator_core::PullRequestEvent;
    ///
    /// let payload = r#"{
    ///     "pull_request": { "number": 12, "body": "Fixes #5" },
    ///     "repository": { "name": "widgets", "owner": { "login": "acme" } }
    /// }"#;
    ///
    /// let event = PullRequestEvent::from_payload(payload, None).unwrap();
    /// assert_eq!(event.number, 12);
    /// assert_eq!(event.repository_owner, "acme");
    /// ```
    pub fn from_payload(
        payload: &str,
        fallback_repository: Option<&str>,
    ) -> Result<Self, InvalidEventError> {
        let raw: RawEvent =
            serde_json::from_str(payload).map_err(|e| InvalidEventError::MalformedPayload {
                reason: e.to_string(),
            })?;

        let pull_request = raw
            .pull_request
            .ok_or_else(|| InvalidEventError::missing("pull_request"))?;

        let number = pull_request
            .number
            .ok_or_else(|| InvalidEventError::missing("pull_request.number"))?;
        if number == 0 {
            return Err(InvalidEventError::invalid(
                "pull_request.number",
                "must be greater than zero",
            ));
        }

        let (repository_owner, repository_name) =
            match raw.repository.and_then(RawRepository::into_parts) {
                Some(parts) => parts,
                None => match fallback_repository {
                    Some(slug) => {
                        debug!(
                            repository = slug,
                            "Event payload has no repository, using fallback"
                        );
                        parse_repository_slug(slug)?
                    }
                    None => return Err(InvalidEventError::missing("repository")),
                },
            };

        Ok(Self {
            number,
            body: pull_request.body.filter(|b| !b.trim().is_empty()),
            repository_owner,
            repository_name,
        })
    }
}

/// Splits an `owner/name` slug into its two parts.
///
/// # Errors
///
/// Returns [`InvalidEventError::InvalidField`] unless the slug has exactly two
/// non-empty segments.
pub fn parse_repository_slug(slug: &str) -> Result<(String, String), InvalidEventError> {
    let mut segments = slug.trim().split('/');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(InvalidEventError::invalid(
            "repository",
            format!("expected 'owner/name', got '{}'", slug),
        )),
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    pull_request: Option<RawPullRequest>,
    repository: Option<RawRepository>,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: Option<u64>,
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    name: Option<String>,
    owner: Option<RawOwner>,
}

impl RawRepository {
    fn into_parts(self) -> Option<(String, String)> {
        let owner = self.owner?.login.filter(|l| !l.is_empty())?;
        let name = self.name.filter(|n| !n.is_empty())?;
        Some((owner, name))
    }
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    login: Option<String>,
}
