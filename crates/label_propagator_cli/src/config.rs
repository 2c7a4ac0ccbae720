//! Configuration management for the label propagator CLI.
//!
//! The configuration file is optional. When it is given, it is read as TOML and
//! every key that is left out falls back to the built-in defaults.

use std::{fs, path::Path};

use label_propagator_core::{
    MissingReferencePolicy, PropagatorSettings, DEFAULT_CLOSING_KEYWORDS,
    DEFAULT_EXCLUDED_PREFIXES,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the label propagator CLI.
///
/// # Example TOML Configuration
///
/// ```toml
/// [propagation]
/// excluded_prefixes = ["LS-", "P-", "U-"]
/// closing_keywords = ["close", "closes", "fix", "fixes", "resolve", "resolves"]
/// on_missing_reference = "ignore"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Settings for the label propagation itself
    #[serde(default)]
    pub propagation: PropagationConfig,
}

/// The `[propagation]` section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropagationConfig {
    /// Labels starting with one of these prefixes are never copied
    pub excluded_prefixes: Vec<String>,

    /// Keywords that link a pull request to the issue it closes
    pub closing_keywords: Vec<String>,

    /// Whether a pull request without an issue reference fails the run
    pub on_missing_reference: MissingReferencePolicy,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            excluded_prefixes: DEFAULT_EXCLUDED_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            closing_keywords: DEFAULT_CLOSING_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            on_missing_reference: MissingReferencePolicy::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or does
    /// not match the configuration schema (unknown keys included).
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the configuration at `path`, or the defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load(path),
            None => {
                info!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Builds the settings handed to the propagator.
    pub fn to_settings(&self, dry_run: bool) -> PropagatorSettings {
        PropagatorSettings {
            closing_keywords: self.propagation.closing_keywords.clone(),
            excluded_prefixes: self.propagation.excluded_prefixes.clone(),
            on_missing_reference: self.propagation.on_missing_reference,
            dry_run,
        }
    }
}
