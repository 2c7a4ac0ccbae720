use std::io;

use label_propagator_core::PropagationError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the label propagator CLI application.
///
/// Every variant ends the run with a failure reported to the CI platform.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or parsing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Failed to load a file from the filesystem.
    ///
    /// Parameters: (path, underlying I/O error)
    #[error("Failed to load file {0}: {1}")]
    LoadFile(String, #[source] io::Error),

    /// The GitHub client could not be created.
    #[error("GitHub client error: {0}")]
    Client(#[source] github_client::Error),

    /// The propagation run failed.
    #[error(transparent)]
    Propagation(#[from] PropagationError),
}
