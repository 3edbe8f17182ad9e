//! Human-readable difference details

use super::pairs::OrientedRecord;
use crate::models::{FieldStatus, NamespaceLabel, ObjectKey};

/// Describe one differing field; `None` for matches
pub fn describe_field(record: &OrientedRecord<'_>, target: &NamespaceLabel) -> Option<String> {
    let path = record.field_path();
    let baseline = record.baseline_value().unwrap_or_default();
    let actual = record.target_value().unwrap_or_default();

    match record.status() {
        FieldStatus::Match => None,
        FieldStatus::ValueMismatch => Some(format!(
            "{}: expected \"{}\", found \"{}\"",
            path, baseline, actual
        )),
        FieldStatus::OnlyInLeft => Some(format!(
            "{}: missing in {} (baseline \"{}\")",
            path, target, baseline
        )),
        FieldStatus::OnlyInRight => Some(format!(
            "{}: only in {} (\"{}\")",
            path, target, actual
        )),
    }
}

pub fn missing_object(key: &ObjectKey, target: &NamespaceLabel) -> String {
    format!("{} is missing in {}", key, target)
}

pub fn extra_object(key: &ObjectKey, target: &NamespaceLabel) -> String {
    format!("{} exists only in {}", key, target)
}

pub fn missing_in_baseline(key: &ObjectKey, baseline: &NamespaceLabel) -> String {
    format!("{} is not defined in baseline {}", key, baseline)
}
