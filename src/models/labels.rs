//! Object keys and namespace labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a logical resource across namespaces
///
/// The textual form (`Kind/name`) is what comparison records carry as their
/// object id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectKey {
    pub kind: String,
    pub name: String,
}

impl ObjectKey {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Object id used in comparison records and sentinel field paths
    pub fn object_id(&self) -> String {
        self.to_string()
    }

    /// Parse an object id back into a key
    ///
    /// `Kind/name` splits on the first slash. A bare name is accepted and gets
    /// an empty kind. Blank ids yield `None`.
    pub fn from_object_id(id: &str) -> Option<Self> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }

        match id.split_once('/') {
            Some((kind, name)) if !kind.is_empty() && !name.is_empty() => {
                Some(Self::new(kind, name))
            }
            _ => Some(Self::new("", id)),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.kind, self.name)
        }
    }
}

/// One side of a comparison, commonly `cluster/namespace`
///
/// Labels are opaque. A display suffix such as `(Baseline)` or `(Actual)` is
/// part of the label, so an uploaded baseline and the live copy of the same
/// namespace stay two distinct sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceLabel(String);

impl NamespaceLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Whether both labels name the same side, ignoring surrounding whitespace
    pub fn same_namespace(&self, other: &NamespaceLabel) -> bool {
        self.0.trim() == other.0.trim()
    }
}

impl fmt::Display for NamespaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NamespaceLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for NamespaceLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}
