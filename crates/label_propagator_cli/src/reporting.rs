//! Reporting run results to the CI platform.
//!
//! GitHub Actions reads workflow commands such as `::error::<message>` from
//! standard output and turns them into annotations on the run.

use label_propagator_core::PropagationError;

use crate::errors::Error;

#[cfg(test)]
#[path = "reporting_tests.rs"]
mod tests;

/// Prefix put in front of every failure message.
pub const FAILURE_PREFIX: &str = "Failed to label PR";

/// Formats the workflow command that marks the run as failed.
pub fn failure_annotation(message: &str) -> String {
    format!("::error::{}: {}", FAILURE_PREFIX, escape_data(message))
}

/// Formats the workflow command for a failed run.
///
/// A missing issue reference is reported on its own, without the failure prefix.
pub fn error_annotation(error: &Error) -> String {
    match error {
        Error::Propagation(PropagationError::NoIssueReference) => {
            format!("::error::{}", escape_data(&error.to_string()))
        }
        other => failure_annotation(&other.to_string()),
    }
}

/// Escapes a message for use as workflow command data.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
