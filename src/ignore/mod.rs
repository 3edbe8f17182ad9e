//! Ignore rules
//!
//! A rule is a field-path prefix. A path is ignored when it equals the rule or
//! continues it past a `.` or `[` boundary, so `metadata.annotations` covers
//! `metadata.annotations.team` and `metadata.annotations[0]` but not
//! `metadata.annotationsExtra`.
//!
//! Built-in defaults and user rules live in one ordered list. Defaults are
//! read-only: removing one is an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rules that are always active
pub const DEFAULT_IGNORE_RULES: &[&str] = &[
    "metadata.namespace",
    "metadata.uid",
    "metadata.resourceVersion",
    "metadata.generation",
    "metadata.creationTimestamp",
    "metadata.managedFields",
    "metadata.selfLink",
    "status",
];

/// Ignore rule errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IgnoreError {
    #[error("Ignore rule cannot be empty")]
    EmptyRule,

    #[error("Ignore rule '{0}' is a built-in default and cannot be removed")]
    ReadOnly(String),

    #[error("Ignore rule not found: {0}")]
    NotFound(String),
}

/// Result type for ignore rule operations
pub type IgnoreResult<T> = Result<T, IgnoreError>;

/// A single ignore rule, tagged by origin
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum IgnoreRule {
    Default(String),
    Custom(String),
}

impl IgnoreRule {
    pub fn path(&self) -> &str {
        match self {
            IgnoreRule::Default(path) | IgnoreRule::Custom(path) => path,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, IgnoreRule::Default(_))
    }

    /// Whether this rule covers `field_path`
    pub fn matches(&self, field_path: &str) -> bool {
        let rule = self.path();
        match field_path.strip_prefix(rule) {
            Some("") => true,
            Some(rest) => rest.starts_with('.') || rest.starts_with('['),
            None => false,
        }
    }
}

impl fmt::Display for IgnoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreRule::Default(path) => write!(f, "{} (default)", path),
            IgnoreRule::Custom(path) => write!(f, "{}", path),
        }
    }
}

/// Ordered rule set: defaults first, then custom rules in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    /// Rule set containing only the built-in defaults
    pub fn with_defaults() -> Self {
        Self {
            rules: DEFAULT_IGNORE_RULES
                .iter()
                .map(|path| IgnoreRule::Default((*path).to_string()))
                .collect(),
        }
    }

    /// Defaults plus the given custom rules
    ///
    /// Blank entries and duplicates are skipped.
    pub fn with_custom<I, S>(custom: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Self::with_defaults();
        for path in custom {
            if let Err(e) = rules.add_custom(path.as_ref()) {
                tracing::debug!("Skipping ignore rule '{}': {}", path.as_ref(), e);
            }
        }
        rules
    }

    /// Add a custom rule
    ///
    /// Returns `Ok(false)` if an equal rule (default or custom) already exists.
    pub fn add_custom(&mut self, path: &str) -> IgnoreResult<bool> {
        let path = normalize(path);
        if path.is_empty() {
            return Err(IgnoreError::EmptyRule);
        }
        if self.rules.iter().any(|rule| rule.path() == path) {
            return Ok(false);
        }
        self.rules.push(IgnoreRule::Custom(path));
        Ok(true)
    }

    /// Remove a custom rule; defaults are refused
    pub fn remove(&mut self, path: &str) -> IgnoreResult<IgnoreRule> {
        let path = normalize(path);
        let position = self
            .rules
            .iter()
            .position(|rule| rule.path() == path)
            .ok_or_else(|| IgnoreError::NotFound(path.clone()))?;

        if self.rules[position].is_default() {
            return Err(IgnoreError::ReadOnly(path));
        }

        Ok(self.rules.remove(position))
    }

    /// Whether `field_path` is excluded from match/mismatch accounting
    pub fn is_ignored(&self, field_path: &str) -> bool {
        self.matching_rule(field_path).is_some()
    }

    /// First rule covering `field_path`
    pub fn matching_rule(&self, field_path: &str) -> Option<&IgnoreRule> {
        self.rules.iter().find(|rule| rule.matches(field_path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &IgnoreRule> {
        self.rules.iter()
    }

    /// Custom rule paths in insertion order
    pub fn custom_paths(&self) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| !rule.is_default())
            .map(|rule| rule.path().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn normalize(path: &str) -> String {
    path.trim().trim_end_matches('.').to_string()
}
