//! Issue reference extraction from pull request descriptions.
//!
//! A pull request links to the issue it closes with a phrase such as
//! `Fixes #42` or `Closes https://github.com/acme/widgets/issues/42`. The
//! [`IssueReferenceExtractor`] finds that phrase and returns the issue number.

use regex::Regex;

use crate::errors::{PropagationError, PropagationResult};

#[cfg(test)]
#[path = "issue_reference_tests.rs"]
mod tests;

/// Closing keywords recognised when no other list is configured.
pub const DEFAULT_CLOSING_KEYWORDS: &[&str] = &[
    "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves", "resolved",
];

/// The textual form in which the issue was referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceForm {
    /// `Fixes https://github.com/<owner>/<repo>/issues/<n>`
    IssueUrl,
    /// `Fixes #<n>`
    Shorthand,
}

/// An issue referenced by a closing keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueReference {
    number: u64,
    form: ReferenceForm,
}

impl IssueReference {
    /// The referenced issue number, always greater than zero.
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn form(&self) -> ReferenceForm {
        self.form
    }
}

impl std::fmt::Display for IssueReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.number)
    }
}

/// Finds the issue a pull request body closes.
///
/// Two patterns are tried in priority order: the full issue URL form first and the
/// `#<number>` shorthand second. The first pattern that matches anywhere in the body
/// wins, so a URL reference is chosen over a shorthand reference even when the
/// shorthand appears earlier in the text. Keywords match case-insensitively and as
/// whole words.
///
/// # Examples
///
/// ```
/// use label_propagator_core::{IssueReferenceExtractor, DEFAULT_CLOSING_KEYWORDS};
///
/// let extractor = IssueReferenceExtractor::new(DEFAULT_CLOSING_KEYWORDS).unwrap();
///
/// let reference = extractor.extract(Some("This fixes #42")).unwrap();
/// assert_eq!(reference.number(), 42);
///
/// assert!(extractor.extract(Some("No link here")).is_none());
/// assert!(extractor.extract(None).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct IssueReferenceExtractor {
    patterns: Vec<(ReferenceForm, Regex)>,
}

impl IssueReferenceExtractor {
    /// Builds an extractor for the given closing keywords.
    ///
    /// Keywords are matched literally; regex metacharacters in them carry no meaning.
    ///
    /// # Errors
    ///
    /// Returns [`PropagationError::Configuration`] if the keyword list is empty or
    /// contains a blank keyword.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> PropagationResult<Self> {
        if keywords.is_empty() {
            return Err(PropagationError::Configuration(
                "at least one closing keyword is required".to_string(),
            ));
        }

        let mut escaped = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let keyword = keyword.as_ref().trim();
            if keyword.is_empty() {
                return Err(PropagationError::Configuration(
                    "closing keywords must not be blank".to_string(),
                ));
            }
            escaped.push(regex::escape(keyword));
        }

        let keyword_group = format!(r"(?i)\b(?:{})\b:?\s+", escaped.join("|"));

        let url_pattern = format!(
            r"{}https://github\.com/[^/\s]+/[^/\s]+/issues/(\d+)",
            keyword_group
        );
        let shorthand_pattern = format!(r"{}#(\d+)", keyword_group);

        Ok(Self {
            patterns: vec![
                (ReferenceForm::IssueUrl, compile(&url_pattern)?),
                (ReferenceForm::Shorthand, compile(&shorthand_pattern)?),
            ],
        })
    }

    /// Returns the first issue reference in `body`, or `None` when there is none.
    ///
    /// Numbers that are zero or too large for `u64` are skipped as if they did not
    /// match.
    pub fn extract(&self, body: Option<&str>) -> Option<IssueReference> {
        let body = body?;

        self.patterns.iter().find_map(|(form, pattern)| {
            pattern
                .captures_iter(body)
                .filter_map(|caps| caps.get(1)?.as_str().parse::<u64>().ok())
                .find(|number| *number > 0)
                .map(|number| IssueReference {
                    number,
                    form: *form,
                })
        })
    }
}

fn compile(pattern: &str) -> PropagationResult<Regex> {
    Regex::new(pattern).map_err(|e| {
        PropagationError::Configuration(format!("closing keyword pattern is invalid: {}", e))
    })
}
