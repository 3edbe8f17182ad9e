//! Comparison payloads produced outside this crate
//!
//! A payload carries the baseline designation and the comparison units of a
//! finished comparison job. JSON and YAML are accepted.

use super::{ValidationReport, evaluate};
use crate::ignore::IgnoreRules;
use crate::models::{ComparisonUnit, NamespaceLabel};
use crate::reconcile::ReconcileError;
use serde::{Deserialize, Serialize};

/// Payload errors
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Invalid JSON comparison payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML comparison payload: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Comparison payload does not name a baseline namespace")]
    MissingBaseline,
}

/// Result of a finished comparison job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPayload {
    pub baseline: NamespaceLabel,
    /// Custom ignore rules requested with the job
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_fields: Vec<String>,
    pub units: Vec<ComparisonUnit>,
}

impl ComparisonPayload {
    pub fn from_json(input: &str) -> Result<Self, PayloadError> {
        let payload: Self = serde_json::from_str(input)?;
        payload.checked()
    }

    pub fn from_yaml(input: &str) -> Result<Self, PayloadError> {
        let payload: Self = serde_yaml::from_str(input)?;
        payload.checked()
    }

    /// Parse JSON when the input starts with `{`, YAML otherwise
    pub fn parse(input: &str) -> Result<Self, PayloadError> {
        if input.trim_start().starts_with('{') {
            Self::from_json(input)
        } else {
            Self::from_yaml(input)
        }
    }

    fn checked(self) -> Result<Self, PayloadError> {
        if self.baseline.is_blank() {
            return Err(PayloadError::MissingBaseline);
        }
        Ok(self)
    }

    /// Defaults plus the payload's own rules plus `extra`
    pub fn ignore_rules(&self, extra: &[String]) -> IgnoreRules {
        IgnoreRules::with_custom(self.ignore_fields.iter().chain(extra))
    }

    pub fn evaluate(&self, ignore: &IgnoreRules) -> Result<ValidationReport, ReconcileError> {
        evaluate(self.baseline.clone(), &self.units, ignore)
    }
}
