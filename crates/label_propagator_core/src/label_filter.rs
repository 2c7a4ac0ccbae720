//! Label filtering.
//!
//! Some issue labels only make sense on the issue itself (lifecycle state,
//! priority, urgency). The [`LabelFilter`] drops them before the remaining labels
//! are copied to the pull request.

#[cfg(test)]
#[path = "label_filter_tests.rs"]
mod tests;

/// Label prefixes excluded when no other list is configured.
///
/// `LS-` marks lifecycle status, `P-` priority and `U-` urgency.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["LS-", "P-", "U-"];

/// An ordered collection of distinct label names.
///
/// The first occurrence of a name fixes its position; later duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    names: Vec<String>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label name unless it is already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.names.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LabelSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// Removes labels whose name starts with an excluded prefix.
///
/// The test is a plain case-sensitive prefix comparison applied to each label on its
/// own. Input order is preserved and filtering an already filtered list changes
/// nothing.
///
/// # Examples
///
/// ```
/// use label_propagator_core::{LabelFilter, DEFAULT_EXCLUDED_PREFIXES};
///
/// let filter = LabelFilter::new(DEFAULT_EXCLUDED_PREFIXES);
/// let kept = filter.filter(["bug", "P-high", "good-first-issue"]);
///
/// assert_eq!(kept.as_slice(), ["bug", "good-first-issue"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFilter {
    excluded_prefixes: Vec<String>,
}

impl LabelFilter {
    /// Creates a filter for the given prefixes.
    ///
    /// Empty prefixes are ignored; they would otherwise exclude every label.
    pub fn new<S: AsRef<str>>(excluded_prefixes: &[S]) -> Self {
        Self {
            excluded_prefixes: excluded_prefixes
                .iter()
                .map(|p| p.as_ref().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn excluded_prefixes(&self) -> &[String] {
        &self.excluded_prefixes
    }

    /// Indicates whether a label survives filtering.
    pub fn should_include(&self, label: &str) -> bool {
        !self
            .excluded_prefixes
            .iter()
            .any(|prefix| label.starts_with(prefix.as_str()))
    }

    /// Returns the labels that survive filtering, in input order.
    pub fn filter<I, S>(&self, labels: I) -> LabelSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .filter(|label| self.should_include(label.as_ref()))
            .map(|label| label.as_ref().to_string())
            .collect()
    }
}
