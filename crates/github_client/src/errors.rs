//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub
//! issues API through the github_client crate. Every failure to talk to GitHub ends up
//! in one of these variants so callers can decide how to report it.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{Error, IssueClient};
///
/// match client.get_issue("octo-org", "octo-repo", 42).await {
///     Ok(issue) => println!("Issue {} has {} labels", issue.number, issue.labels.len()),
///     Err(Error::NotFound) => eprintln!("No such issue"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub answered with a non-success status that has no dedicated variant.
    ///
    /// Parameters: the HTTP status code and the message GitHub returned.
    #[error("API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when:
    /// - The token is missing, invalid or expired
    /// - The token lacks the permissions needed for the request
    /// - The client cannot be built from the supplied settings
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The request never produced a usable GitHub response.
    ///
    /// Covers unreachable hosts, broken connections, invalid URIs and bodies that
    /// could not be decoded. The contained string describes the underlying failure.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The requested resource was not found.
    ///
    /// GitHub also answers 404 for private resources the token cannot see.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    ///
    /// No retry is attempted by this crate.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
