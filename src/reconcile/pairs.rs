//! Baseline pairing
//!
//! Orients every comparison unit as (baseline, target) and groups its records
//! by object and target namespace. Units whose right side is the baseline are
//! read with left and right swapped; units where both sides are the baseline
//! only register which objects the baseline defines.
//!
//! Collection is silent. Skipped units and records are counted and reported by
//! the caller.

use crate::models::{ComparisonUnit, FieldComparisonRecord, FieldStatus, NamespaceLabel, ObjectKey};
use std::collections::{BTreeMap, BTreeSet};

/// A record read from the baseline's point of view
#[derive(Debug, Clone, Copy)]
pub struct OrientedRecord<'a> {
    record: &'a FieldComparisonRecord,
    status: FieldStatus,
    flipped: bool,
}

impl<'a> OrientedRecord<'a> {
    /// `None` for records without a known status
    pub fn new(record: &'a FieldComparisonRecord, flipped: bool) -> Option<Self> {
        let status = record.status?;
        Some(Self {
            record,
            status: if flipped { status.flipped() } else { status },
            flipped,
        })
    }

    pub fn field_path(&self) -> &'a str {
        &self.record.field_path
    }

    /// Status with ONLY_IN_LEFT meaning "only in baseline"
    pub fn status(&self) -> FieldStatus {
        self.status
    }

    pub fn baseline_value(&self) -> Option<&'a str> {
        if self.flipped {
            self.record.right_value.as_deref()
        } else {
            self.record.left_value.as_deref()
        }
    }

    pub fn target_value(&self) -> Option<&'a str> {
        if self.flipped {
            self.record.left_value.as_deref()
        } else {
            self.record.right_value.as_deref()
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.record.is_sentinel()
    }
}

/// Records of all baseline pairs in a run
#[derive(Debug, Default)]
pub struct BaselinePairs<'a> {
    /// Objects registered by baseline-vs-baseline units
    pub baseline_objects: BTreeSet<ObjectKey>,
    /// Target namespaces in order of first appearance
    pub targets: Vec<NamespaceLabel>,
    /// Records per object, per target namespace
    pub groups: BTreeMap<ObjectKey, BTreeMap<NamespaceLabel, Vec<OrientedRecord<'a>>>>,
    pub skipped_units: usize,
    pub skipped_records: usize,
}

impl<'a> BaselinePairs<'a> {
    /// Pair every unit with the baseline, dropping units and records that cannot be placed
    pub fn collect(units: &'a [ComparisonUnit], baseline: &NamespaceLabel) -> Self {
        let mut pairs = Self::default();

        for unit in units {
            let left_is_baseline = unit.left.same_namespace(baseline);
            let right_is_baseline = unit.right.same_namespace(baseline);

            let (target, flipped) = match (left_is_baseline, right_is_baseline) {
                (true, true) => {
                    pairs.register_baseline_objects(unit);
                    continue;
                }
                (true, false) => (&unit.right, false),
                (false, true) => (&unit.left, true),
                (false, false) => {
                    pairs.skipped_units += 1;
                    continue;
                }
            };

            let target = pairs.canonical_target(target);
            for record in &unit.records {
                let (Some(key), Some(oriented)) =
                    (pairs.accept(record), OrientedRecord::new(record, flipped))
                else {
                    continue;
                };
                pairs
                    .groups
                    .entry(key)
                    .or_default()
                    .entry(target.clone())
                    .or_default()
                    .push(oriented);
            }
        }

        pairs
    }

    fn register_baseline_objects(&mut self, unit: &'a ComparisonUnit) {
        for record in &unit.records {
            if let Some(key) = self.accept(record) {
                self.baseline_objects.insert(key);
            }
        }
    }

    fn accept(&mut self, record: &FieldComparisonRecord) -> Option<ObjectKey> {
        let key = if record.is_well_formed() {
            ObjectKey::from_object_id(&record.object_id)
        } else {
            None
        };

        if key.is_none() {
            self.skipped_records += 1;
        }
        key
    }

    /// Reuse the first spelling seen for labels that differ only in surrounding whitespace
    fn canonical_target(&mut self, label: &NamespaceLabel) -> NamespaceLabel {
        if let Some(existing) = self.targets.iter().find(|t| t.same_namespace(label)) {
            return existing.clone();
        }
        self.targets.push(label.clone());
        label.clone()
    }
}
