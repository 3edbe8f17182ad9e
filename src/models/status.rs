//! Object statuses per namespace and across namespaces

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of one object in one namespace column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectStatus {
    /// The baseline's own copy; reference only
    Baseline,
    Identical,
    Different,
    Missing,
    Extra,
}

impl ObjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectStatus::Baseline => "BASELINE",
            ObjectStatus::Identical => "IDENTICAL",
            ObjectStatus::Different => "DIFFERENT",
            ObjectStatus::Missing => "MISSING",
            ObjectStatus::Extra => "EXTRA",
        }
    }
}

impl fmt::Display for ObjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status cell for one (object, namespace) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceStatus {
    pub status: ObjectStatus,
    pub difference_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl NamespaceStatus {
    pub fn new(status: ObjectStatus) -> Self {
        Self {
            status,
            difference_count: 0,
            details: Vec::new(),
        }
    }

    pub fn baseline() -> Self {
        Self::new(ObjectStatus::Baseline)
    }

    pub fn identical() -> Self {
        Self::new(ObjectStatus::Identical)
    }

    /// Whole-object status (missing or extra) carrying one explanatory detail
    pub fn whole_object(status: ObjectStatus, detail: String) -> Self {
        Self {
            status,
            difference_count: 1,
            details: vec![detail],
        }
    }

    /// Field differences found for an object present on both sides
    pub fn from_differences(details: Vec<String>) -> Self {
        if details.is_empty() {
            return Self::identical();
        }
        Self {
            status: ObjectStatus::Different,
            difference_count: details.len(),
            details,
        }
    }
}

/// Verdict for an object across every non-baseline namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallStatus {
    Ok,
    Nok,
}

impl OverallStatus {
    /// `Ok` only if every given target status is `Identical`
    pub fn from_target_statuses<'a>(statuses: impl IntoIterator<Item = &'a ObjectStatus>) -> Self {
        if statuses
            .into_iter()
            .all(|status| *status == ObjectStatus::Identical)
        {
            OverallStatus::Ok
        } else {
            OverallStatus::Nok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Ok => "OK",
            OverallStatus::Nok => "NOK",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, OverallStatus::Ok)
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
