//! # Label Propagator Core
//!
//! This crate copies the labels of an issue onto the pull request that closes it.
//!
//! ## Overview
//!
//! A propagation run handles one pull request event:
//! 1. Extract the referenced issue from the pull request body ([`IssueReferenceExtractor`])
//! 2. Fetch that issue from the tracker ([`github_client::IssueClient::get_issue`])
//! 3. Drop labels with excluded prefixes ([`LabelFilter`])
//! 4. Add the remaining labels to the pull request ([`github_client::IssueClient::add_labels`])
//!
//! A body without an issue reference ends the run early without side effects. A
//! tracker failure aborts the run; nothing is retried.
//!
//! ## Examples
//!
//! ```no_run
//! use label_propagator_core::{LabelPropagator, PropagatorSettings, PullRequestEvent};
//! # use github_client::IssueClient;
//!
//! # async fn example<C: IssueClient>(client: C) -> Result<(), Box<dyn std::error::Error>> {
//! let payload = std::fs::read_to_string("event.json")?;
//! let event = PullRequestEvent::from_payload(&payload, Some("acme/widgets"))?;
//!
//! let propagator = LabelPropagator::new(client, PropagatorSettings::default())?;
//! let outcome = propagator.propagate(&event).await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The tracker is reached only through the [`github_client::IssueClient`] trait so the
//! flow can be exercised with an in-memory client. Keyword and prefix lists are
//! passed in through [`PropagatorSettings`]; [`DEFAULT_CLOSING_KEYWORDS`] and
//! [`DEFAULT_EXCLUDED_PREFIXES`] hold the defaults.

pub mod errors;
pub use errors::{InvalidEventError, PropagationError, PropagationResult, TrackerOperation};

pub mod event;
pub use event::{parse_repository_slug, PullRequestEvent};

pub mod issue_reference;
pub use issue_reference::{
    IssueReference, IssueReferenceExtractor, ReferenceForm, DEFAULT_CLOSING_KEYWORDS,
};

pub mod label_filter;
pub use label_filter::{LabelFilter, LabelSet, DEFAULT_EXCLUDED_PREFIXES};

pub mod propagator;
pub use propagator::{
    LabelPropagator, MissingReferencePolicy, PropagationOutcome, PropagatorSettings,
};
