//! Whole-object presence

use super::pairs::OrientedRecord;
use crate::models::FieldStatus;

/// Presence of an object in one (baseline, target) pair
///
/// Settled from the sentinel record before any field record is evaluated.
/// A sentinel wins over every field record of the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectPresence {
    /// Defined on both sides; field records decide the status
    Present,
    /// Defined in the baseline only
    MissingInTarget,
    /// Defined in the target only
    ExtraInTarget,
}

impl ObjectPresence {
    pub fn detect(records: &[OrientedRecord<'_>]) -> Self {
        for record in records.iter().filter(|r| r.is_sentinel()) {
            match record.status() {
                FieldStatus::OnlyInLeft => return ObjectPresence::MissingInTarget,
                FieldStatus::OnlyInRight => return ObjectPresence::ExtraInTarget,
                FieldStatus::Match | FieldStatus::ValueMismatch => {}
            }
        }
        ObjectPresence::Present
    }

    /// Whether the baseline defines the object
    pub fn in_baseline(self) -> bool {
        !matches!(self, ObjectPresence::ExtraInTarget)
    }
}
