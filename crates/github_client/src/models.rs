//! # Models
//!
//! This module contains the data models returned by the GitHub issues API.
//!
//! Only the fields the label propagation needs are modelled; any other field
//! in the GitHub response is ignored during deserialization.

use serde::{Deserialize, Serialize};

use crate::Label;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a GitHub issue (or a pull request seen through the issues API).
///
/// # Examples
///
/// ```rust
/// use github_client::{models::Issue, Label};
///
/// let issue = Issue {
///     number: 5,
///     title: "Crash on start-up".to_string(),
///     labels: vec![Label::new("bug")],
///     pull_request: None,
/// };
///
/// assert_eq!(issue.label_names().collect::<Vec<_>>(), vec!["bug"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// The issue number within its repository
    pub number: u64,

    /// The title of the issue
    #[serde(default)]
    pub title: String,

    /// The labels attached to the issue, in the order GitHub returns them
    #[serde(default)]
    pub labels: Vec<Label>,

    /// Present only when the issue is actually a pull request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestLink>,
}

impl Issue {
    /// Returns the names of the labels in their original order.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }

    /// Indicates whether GitHub reports this issue as a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Marker object GitHub attaches to issues that are pull requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestLink {
    #[serde(default)]
    pub url: Option<String>,
}
