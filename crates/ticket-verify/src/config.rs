//! Verifier configuration.
//!
//! The extraction patterns, the fuzzy-match tolerance and the validity
//! window are loaded from a YAML document:
//!
//! ```yaml
//! version: "1.0"
//! patterns:
//!   - name: ticket_label
//!     pattern: '(?i-u:TICKET)[:\s-]*([A-Za-z0-9]{6,12})'
//! max_edit_distance: 2
//! validity_window_days: 60
//! ```
//!
//! Every field is optional; missing fields take the built-in defaults.

use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Largest edit distance still accepted as a match
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// How many days back a ticket date may lie
pub const DEFAULT_VALIDITY_WINDOW_DAYS: i64 = 60;

/// Errors raised while loading or compiling a verifier configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read verifier config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse verifier config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid pattern '{name}': {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("Pattern '{name}' has no capture group")]
    MissingCapture { name: String },
    #[error("Validity window must not be negative (got {0} days)")]
    NegativeWindow(i64),
}

/// Top-level config file structure
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierConfig {
    #[serde(default = "default_version")]
    pub version: String,
    /// Extraction patterns, tried in order
    #[serde(default = "default_patterns")]
    pub patterns: Vec<PatternSpec>,
    #[serde(default = "default_max_edit_distance", alias = "maxEditDistance")]
    pub max_edit_distance: usize,
    #[serde(default = "default_validity_window_days", alias = "validityWindowDays")]
    pub validity_window_days: i64,
}

/// A named extraction pattern. Capture group 1 holds the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatternSpec {
    pub name: String,
    pub pattern: String,
}

impl PatternSpec {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// A pattern ready for extraction
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub name: String,
    pub regex: Regex,
}

fn default_version() -> String {
    "1.0".to_string()
}

// Case folding and word boundaries are ASCII only, so non-ASCII letters
// never stand in for a label character or glue onto a bare run.
fn default_patterns() -> Vec<PatternSpec> {
    vec![
        PatternSpec::new("ticket_label", r"(?i-u:TICKET)[:\s-]*([A-Za-z0-9]{6,12})"),
        PatternSpec::new("id_label", r"(?i-u:ID)[:\s-]*([A-Za-z0-9]{6,12})"),
        PatternSpec::new("bare_run", r"(?-u:\b)([A-Z0-9]{8,12})(?-u:\b)"),
    ]
}

fn default_max_edit_distance() -> usize {
    DEFAULT_MAX_EDIT_DISTANCE
}

fn default_validity_window_days() -> i64 {
    DEFAULT_VALIDITY_WINDOW_DAYS
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            patterns: default_patterns(),
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            validity_window_days: DEFAULT_VALIDITY_WINDOW_DAYS,
        }
    }
}

impl VerifierConfig {
    /// Load a config from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a config from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Compile the pattern list, keeping its order.
    ///
    /// An empty list is allowed: extraction then always falls back to
    /// normalizing the whole input.
    pub fn compile_patterns(&self) -> Result<Vec<CompiledPattern>, ConfigError> {
        self.patterns.iter().map(compile_pattern).collect()
    }
}

fn compile_pattern(entry: &PatternSpec) -> Result<CompiledPattern, ConfigError> {
    let regex = Regex::new(&entry.pattern).map_err(|source| ConfigError::Pattern {
        name: entry.name.clone(),
        source,
    })?;

    // captures_len counts the implicit whole-match group
    if regex.captures_len() < 2 {
        return Err(ConfigError::MissingCapture {
            name: entry.name.clone(),
        });
    }

    Ok(CompiledPattern {
        name: entry.name.clone(),
        regex,
    })
}
