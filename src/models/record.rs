//! Field-level comparison records
//!
//! Records are produced by a comparator for every field path in the union of
//! a baseline object and its target counterpart. Whole-object presence is
//! carried by a sentinel record whose field path equals the object id.

use super::labels::{NamespaceLabel, ObjectKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value carried by the side of a sentinel record where the object exists
pub const SENTINEL_VALUE: &str = "exists";

/// Outcome of comparing one field path between baseline (left) and target (right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldStatus {
    Match,
    OnlyInLeft,
    OnlyInRight,
    ValueMismatch,
}

impl FieldStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldStatus::Match => "MATCH",
            FieldStatus::OnlyInLeft => "ONLY_IN_LEFT",
            FieldStatus::OnlyInRight => "ONLY_IN_RIGHT",
            FieldStatus::ValueMismatch => "VALUE_MISMATCH",
        }
    }

    pub fn is_difference(&self) -> bool {
        !matches!(self, FieldStatus::Match)
    }

    /// Status as seen with left and right swapped
    pub fn flipped(self) -> Self {
        match self {
            FieldStatus::OnlyInLeft => FieldStatus::OnlyInRight,
            FieldStatus::OnlyInRight => FieldStatus::OnlyInLeft,
            other => other,
        }
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MATCH" => Ok(FieldStatus::Match),
            "ONLY_IN_LEFT" => Ok(FieldStatus::OnlyInLeft),
            "ONLY_IN_RIGHT" => Ok(FieldStatus::OnlyInRight),
            "VALUE_MISMATCH" => Ok(FieldStatus::ValueMismatch),
            _ => Err(format!("Unknown field status: {}", s)),
        }
    }
}

/// Reads a status leniently: absent, non-string or unknown values become `None`
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<FieldStatus>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}

/// One field path compared between a baseline object and a target object
///
/// `object_id` and `field_path` default to empty and `status` to `None` when
/// absent or unreadable, so that malformed records can be deserialized and
/// skipped later instead of failing a whole payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldComparisonRecord {
    #[serde(default)]
    pub object_id: String,
    #[serde(default)]
    pub field_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_value: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<FieldStatus>,
}

impl FieldComparisonRecord {
    pub fn new(
        object_id: impl Into<String>,
        field_path: impl Into<String>,
        left_value: Option<String>,
        right_value: Option<String>,
        status: FieldStatus,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            field_path: field_path.into(),
            left_value,
            right_value,
            status: Some(status),
        }
    }

    /// Compare a single path given the values found on each side
    ///
    /// Returns `None` when the path exists on neither side.
    pub fn from_values(
        object_id: &str,
        field_path: &str,
        left: Option<&str>,
        right: Option<&str>,
    ) -> Option<Self> {
        let status = match (left, right) {
            (Some(l), Some(r)) if l == r => FieldStatus::Match,
            (Some(_), Some(_)) => FieldStatus::ValueMismatch,
            (Some(_), None) => FieldStatus::OnlyInLeft,
            (None, Some(_)) => FieldStatus::OnlyInRight,
            (None, None) => return None,
        };
        Some(Self::new(
            object_id,
            field_path,
            left.map(str::to_string),
            right.map(str::to_string),
            status,
        ))
    }

    /// Sentinel signalling the object exists in the baseline but not in the target
    pub fn missing_object(key: &ObjectKey) -> Self {
        let id = key.object_id();
        Self::new(
            id.clone(),
            id,
            Some(SENTINEL_VALUE.to_string()),
            None,
            FieldStatus::OnlyInLeft,
        )
    }

    /// Sentinel signalling the object exists only in the target
    pub fn extra_object(key: &ObjectKey) -> Self {
        let id = key.object_id();
        Self::new(
            id.clone(),
            id,
            None,
            Some(SENTINEL_VALUE.to_string()),
            FieldStatus::OnlyInRight,
        )
    }

    /// Sentinel confirming the object exists on both sides
    pub fn present_object(key: &ObjectKey) -> Self {
        let id = key.object_id();
        Self::new(
            id.clone(),
            id,
            Some(SENTINEL_VALUE.to_string()),
            Some(SENTINEL_VALUE.to_string()),
            FieldStatus::Match,
        )
    }

    /// Whether this record addresses the object itself rather than one of its fields
    pub fn is_sentinel(&self) -> bool {
        !self.object_id.is_empty() && self.field_path == self.object_id
    }

    /// Malformed records lack an object id, a field path or a known status
    pub fn is_well_formed(&self) -> bool {
        !self.object_id.trim().is_empty()
            && !self.field_path.trim().is_empty()
            && self.status.is_some()
    }
}

/// Records produced by comparing one namespace (left) against another (right)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonUnit {
    pub left: NamespaceLabel,
    pub right: NamespaceLabel,
    pub records: Vec<FieldComparisonRecord>,
}

impl ComparisonUnit {
    pub fn new(
        left: impl Into<NamespaceLabel>,
        right: impl Into<NamespaceLabel>,
        records: Vec<FieldComparisonRecord>,
    ) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            records,
        }
    }
}
