//! Label propagation error types.
//!
//! A pull request without an issue reference is normally not an error at all; it
//! becomes [`PropagationError::NoIssueReference`] only when the caller asked for
//! that case to fail the run.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result alias used throughout the crate.
pub type PropagationResult<T> = Result<T, PropagationError>;

/// The tracker operation that was running when a transport failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerOperation {
    FetchIssue,
    ApplyLabels,
}

impl std::fmt::Display for TrackerOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerOperation::FetchIssue => write!(f, "fetch issue"),
            TrackerOperation::ApplyLabels => write!(f, "apply labels"),
        }
    }
}

/// Errors that abort a label propagation run.
#[derive(Error, Debug)]
pub enum PropagationError {
    /// The pull request body does not reference an issue and the missing
    /// reference policy is set to fail.
    #[error("No issue reference found in PR description.")]
    NoIssueReference,

    /// Communication with the issue tracker failed.
    ///
    /// Nothing is retried. If the fetch failed the apply step never ran.
    #[error("Failed to {operation}: {source}")]
    Transport {
        /// The step that failed
        operation: TrackerOperation,
        /// The client error reported for the request
        #[source]
        source: github_client::Error,
    },

    /// The event payload failed boundary validation.
    #[error(transparent)]
    InvalidEvent(#[from] InvalidEventError),

    /// The propagation settings cannot be used.
    #[error("Invalid propagation settings: {0}")]
    Configuration(String),
}

impl PropagationError {
    pub(crate) fn transport(operation: TrackerOperation, source: github_client::Error) -> Self {
        PropagationError::Transport { operation, source }
    }
}

/// The pull request event payload is missing a required field or is malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidEventError {
    #[error("Event payload is not valid JSON: {reason}")]
    MalformedPayload { reason: String },

    #[error("Event payload is missing required field: {field}")]
    MissingField { field: String },

    #[error("Event field {field} has an invalid value: {reason}")]
    InvalidField { field: String, reason: String },
}

impl InvalidEventError {
    pub(crate) fn missing(field: &str) -> Self {
        InvalidEventError::MissingField {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        InvalidEventError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
