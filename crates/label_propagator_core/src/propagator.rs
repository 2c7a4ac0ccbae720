//! Orchestration of a single label propagation run.
//!
//! A run walks EXTRACT, FETCH, FILTER and APPLY once, in that order. It stops early
//! when the pull request does not reference an issue and aborts on the first
//! tracker failure.

use github_client::{models::Issue, IssueClient};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::errors::{PropagationError, PropagationResult, TrackerOperation};
use crate::event::PullRequestEvent;
use crate::issue_reference::{IssueReferenceExtractor, DEFAULT_CLOSING_KEYWORDS};
use crate::label_filter::{LabelFilter, DEFAULT_EXCLUDED_PREFIXES};

#[cfg(test)]
#[path = "propagator_tests.rs"]
mod tests;

/// What to do when the pull request body does not reference an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingReferencePolicy {
    /// Finish successfully without touching the pull request.
    #[default]
    Ignore,
    /// Fail the run with [`PropagationError::NoIssueReference`].
    Fail,
}

/// Settings injected into a [`LabelPropagator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagatorSettings {
    pub closing_keywords: Vec<String>,
    pub excluded_prefixes: Vec<String>,
    pub on_missing_reference: MissingReferencePolicy,
    /// Compute the labels but never call the apply step.
    pub dry_run: bool,
}

impl Default for PropagatorSettings {
    fn default() -> Self {
        Self {
            closing_keywords: DEFAULT_CLOSING_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            excluded_prefixes: DEFAULT_EXCLUDED_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            on_missing_reference: MissingReferencePolicy::default(),
            dry_run: false,
        }
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// The pull request body does not reference an issue.
    NoIssueReference,
    /// Every label on the issue was filtered out, or the referenced number is a
    /// pull request. Nothing was applied.
    NothingToApply { issue: u64 },
    /// The labels were added to the pull request.
    Applied { issue: u64, labels: Vec<String> },
    /// Dry run: these labels would have been added.
    DryRun { issue: u64, labels: Vec<String> },
}

impl std::fmt::Display for PropagationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropagationOutcome::NoIssueReference => {
                write!(f, "No issue reference found in PR description.")
            }
            PropagationOutcome::NothingToApply { issue } => {
                write!(f, "Issue #{} has no labels to copy.", issue)
            }
            PropagationOutcome::Applied { issue, labels } => write!(
                f,
                "Copied labels from issue #{}: {}",
                issue,
                labels.join(", ")
            ),
            PropagationOutcome::DryRun { issue, labels } => write!(
                f,
                "Dry run, would copy labels from issue #{}: {}",
                issue,
                labels.join(", ")
            ),
        }
    }
}

/// Copies the labels of the issue a pull request closes onto the pull request.
///
/// # Examples
///
/// ```rust,ignore
/// use github_client::{create_token_client, GitHubClient};
/// use label_propagator_core::{LabelPropagator, PropagatorSettings, PullRequestEvent};
/// use secrecy::SecretString;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let token = SecretString::from("ghp_example".to_string());
/// let client = GitHubClient::new(create_token_client(&token, None)?);
/// let propagator = LabelPropagator::new(client, PropagatorSettings::default())?;
///
/// let event = PullRequestEvent::new(12, Some("Resolves #5".to_string()), "acme", "widgets");
/// let outcome = propagator.propagate(&event).await?;
/// println!("{outcome}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LabelPropagator<C> {
    client: C,
    extractor: IssueReferenceExtractor,
    filter: LabelFilter,
    on_missing_reference: MissingReferencePolicy,
    dry_run: bool,
}

impl<C: IssueClient> LabelPropagator<C> {
    /// Creates a propagator that talks to the tracker through `client`.
    ///
    /// # Errors
    ///
    /// Returns [`PropagationError::Configuration`] if the closing keywords are unusable.
    pub fn new(client: C, settings: PropagatorSettings) -> PropagationResult<Self> {
        Ok(Self {
            client,
            extractor: IssueReferenceExtractor::new(&settings.closing_keywords)?,
            filter: LabelFilter::new(&settings.excluded_prefixes),
            on_missing_reference: settings.on_missing_reference,
            dry_run: settings.dry_run,
        })
    }

    /// Runs the propagation for one pull request event.
    ///
    /// # Errors
    ///
    /// - [`PropagationError::NoIssueReference`] when no issue is referenced and the
    ///   policy is [`MissingReferencePolicy::Fail`].
    /// - [`PropagationError::Transport`] when fetching the issue or applying the
    ///   labels fails. A failed fetch means the apply step is never attempted.
    ///
    /// A reference that resolves to another pull request ends the run with
    /// [`PropagationOutcome::NothingToApply`].
    #[instrument(
        skip(self, event),
        fields(
            owner = %event.repository_owner,
            repo = %event.repository_name,
            pr_number = event.number
        )
    )]
    pub async fn propagate(
        &self,
        event: &PullRequestEvent,
    ) -> PropagationResult<PropagationOutcome> {
        let Some(reference) = self.extractor.extract(event.body.as_deref()) else {
            return match self.on_missing_reference {
                MissingReferencePolicy::Ignore => {
                    info!("No issue reference found in PR description, nothing to do");
                    Ok(PropagationOutcome::NoIssueReference)
                }
                MissingReferencePolicy::Fail => {
                    warn!("No issue reference found in PR description");
                    Err(PropagationError::NoIssueReference)
                }
            };
        };

        info!(
            issue_number = reference.number(),
            form = ?reference.form(),
            "Found issue reference"
        );

        let issue = self.fetch_issue(event, reference.number()).await?;

        if issue.is_pull_request() {
            warn!(
                issue_number = issue.number,
                title = %issue.title,
                "Referenced number is a pull request, not copying its labels"
            );
            return Ok(PropagationOutcome::NothingToApply {
                issue: reference.number(),
            });
        }

        let labels = self.filter.filter(issue.label_names());
        info!(
            issue_number = issue.number,
            issue_label_count = issue.labels.len(),
            label_count = labels.len(),
            "Filtered issue labels"
        );

        if labels.is_empty() {
            info!(issue_number = issue.number, "No labels left to apply");
            return Ok(PropagationOutcome::NothingToApply {
                issue: reference.number(),
            });
        }

        let labels = labels.into_vec();

        if self.dry_run {
            info!(labels = ?labels, "Dry run, skipping label application");
            return Ok(PropagationOutcome::DryRun {
                issue: reference.number(),
                labels,
            });
        }

        self.client
            .add_labels(
                &event.repository_owner,
                &event.repository_name,
                event.number,
                &labels,
            )
            .await
            .map_err(|e| PropagationError::transport(TrackerOperation::ApplyLabels, e))?;

        info!(labels = ?labels, "Applied labels to pull request");

        Ok(PropagationOutcome::Applied {
            issue: reference.number(),
            labels,
        })
    }

    async fn fetch_issue(
        &self,
        event: &PullRequestEvent,
        issue_number: u64,
    ) -> PropagationResult<Issue> {
        self.client
            .get_issue(&event.repository_owner, &event.repository_name, issue_number)
            .await
            .map_err(|e| PropagationError::transport(TrackerOperation::FetchIssue, e))
    }
}
