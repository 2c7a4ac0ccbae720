//! Label propagation command module.
//!
//! Loads the configuration and the pull request event written by the CI platform,
//! builds an authenticated GitHub client and runs the label propagation once.

use std::{fs, path::PathBuf};

use clap::Args;
use github_client::{create_token_client, GitHubClient, IssueClient};
use label_propagator_core::{LabelPropagator, PropagationOutcome, PullRequestEvent};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::{config::AppConfig, errors::Error};

#[cfg(test)]
#[path = "propagate_cmd_tests.rs"]
mod propagate_cmd_tests;

/// Arguments for a propagation run.
///
/// Every argument can be supplied through the environment variables GitHub Actions
/// sets for a workflow step.
#[derive(Args, Clone)]
pub struct PropagateArgs {
    /// Token used to read the issue and label the pull request.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, value_parser = parse_secret)]
    pub github_token: SecretString,

    /// Path of the JSON payload of the pull request event.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: PathBuf,

    /// Repository as `owner/name`, used when the event payload does not name one.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Root of the GitHub REST API, for GitHub Enterprise Server.
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Work out which labels would be copied without applying them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Runs the propagation against GitHub.
///
/// # Errors
///
/// Returns an error if the arguments, configuration or event are invalid, the
/// GitHub client cannot be built, or the propagation fails.
pub async fn execute(args: &PropagateArgs) -> Result<PropagationOutcome, Error> {
    if args.github_token.expose_secret().trim().is_empty() {
        return Err(Error::InvalidArguments(
            "--github-token must not be empty".to_string(),
        ));
    }

    let octocrab =
        create_token_client(&args.github_token, args.api_url.as_deref()).map_err(Error::Client)?;

    execute_with_client(GitHubClient::new(octocrab), args).await
}

/// Runs the propagation with the given issue client.
pub async fn execute_with_client<C: IssueClient>(
    client: C,
    args: &PropagateArgs,
) -> Result<PropagationOutcome, Error> {
    let config = AppConfig::load_or_default(args.config.as_deref())?;
    let event = load_event(args)?;

    info!(
        owner = %event.repository_owner,
        repo = %event.repository_name,
        pr_number = event.number,
        dry_run = args.dry_run,
        "Propagating labels to pull request"
    );

    let propagator = LabelPropagator::new(client, config.to_settings(args.dry_run))?;
    let outcome = propagator.propagate(&event).await?;

    Ok(outcome)
}

/// Wraps a command line value in a [`SecretString`] so it never reaches logs.
fn parse_secret(value: &str) -> Result<SecretString, String> {
    Ok(SecretString::from(value))
}

fn load_event(args: &PropagateArgs) -> Result<PullRequestEvent, Error> {
    debug!("Loading event payload from {:?}", args.event_path);

    let payload = fs::read_to_string(&args.event_path)
        .map_err(|e| Error::LoadFile(args.event_path.display().to_string(), e))?;

    let event = PullRequestEvent::from_payload(&payload, args.repository.as_deref())
        .map_err(label_propagator_core::PropagationError::from)?;

    Ok(event)
}
