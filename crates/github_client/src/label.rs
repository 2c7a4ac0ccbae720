//! Label domain types.
//!
//! This module contains types representing GitHub issue and pull request labels.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;

/// Represents a label on a pull request or issue.
///
/// Only the name is kept; colour and description are irrelevant for copying
/// labels between an issue and a pull request.
///
/// # Examples
///
/// ```
/// use github_client::Label;
///
/// let label = Label::new("bug");
/// assert_eq!(label.name, "bug");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,
}

impl Label {
    /// Creates a label with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request body for `POST /repos/{owner}/{repo}/issues/{number}/labels`.
#[derive(Debug, Clone, Serialize)]
pub struct AddLabelsPayload<'a> {
    pub labels: &'a [String],
}
