//! Object reconciliation
//!
//! Folds field-level comparison records into one status per (object,
//! namespace) and one overall verdict per object. The baseline is designated
//! explicitly; it is never inferred from record order.
//!
//! Per object and target namespace:
//! 1. Presence is settled from the sentinel record (`MISSING` / `EXTRA`)
//! 2. Otherwise any non-ignored difference makes the object `DIFFERENT`
//! 3. No differences leaves it `IDENTICAL`
//!
//! The baseline column is `BASELINE` when the baseline defines the object and
//! `MISSING` otherwise. Overall status only looks at target columns.

mod details;
mod pairs;
mod presence;

pub use pairs::{BaselinePairs, OrientedRecord};
pub use presence::ObjectPresence;

use crate::ignore::IgnoreRules;
use crate::models::{
    ComparisonUnit, NamespaceLabel, NamespaceStatus, ObjectKey, ObjectStatus, OverallStatus,
};
use std::collections::BTreeMap;

/// Reconciliation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    #[error("Baseline namespace label cannot be empty")]
    EmptyBaseline,
}

/// Statuses of one object across all namespaces of a run
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectReconciliation {
    pub statuses: BTreeMap<NamespaceLabel, NamespaceStatus>,
    pub overall: OverallStatus,
}

impl ObjectReconciliation {
    pub fn status_in(&self, namespace: &NamespaceLabel) -> Option<&NamespaceStatus> {
        self.statuses.get(namespace)
    }
}

/// Result of reconciling one comparison run
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub baseline: NamespaceLabel,
    /// Baseline first, then targets in order of first appearance
    pub namespaces: Vec<NamespaceLabel>,
    pub objects: BTreeMap<ObjectKey, ObjectReconciliation>,
    pub skipped_units: usize,
    pub skipped_records: usize,
}

impl Reconciliation {
    pub fn object(&self, key: &ObjectKey) -> Option<&ObjectReconciliation> {
        self.objects.get(key)
    }

    pub fn targets(&self) -> &[NamespaceLabel] {
        &self.namespaces[1..]
    }

    pub fn all_ok(&self) -> bool {
        self.objects.values().all(|o| o.overall.is_ok())
    }
}

#[derive(Default)]
struct ObjectEntry {
    in_baseline: bool,
    targets: BTreeMap<NamespaceLabel, NamespaceStatus>,
}

/// Reconciles comparison units against one baseline namespace
#[derive(Debug, Clone)]
pub struct ObjectReconciler<'a> {
    baseline: NamespaceLabel,
    ignore: &'a IgnoreRules,
}

impl<'a> ObjectReconciler<'a> {
    pub fn new(baseline: NamespaceLabel, ignore: &'a IgnoreRules) -> Result<Self, ReconcileError> {
        if baseline.is_blank() {
            return Err(ReconcileError::EmptyBaseline);
        }
        Ok(Self { baseline, ignore })
    }

    pub fn baseline(&self) -> &NamespaceLabel {
        &self.baseline
    }

    pub fn reconcile(&self, units: &[ComparisonUnit]) -> Reconciliation {
        let pairs = BaselinePairs::collect(units, &self.baseline);
        if pairs.skipped_units > 0 {
            tracing::warn!(
                "Skipped {} comparisons that do not involve baseline {}",
                pairs.skipped_units,
                self.baseline
            );
        }
        if pairs.skipped_records > 0 {
            tracing::warn!(
                "Skipped {} comparison records without object id, field path or known status",
                pairs.skipped_records
            );
        }

        let mut entries: BTreeMap<ObjectKey, ObjectEntry> = BTreeMap::new();

        for key in &pairs.baseline_objects {
            entries.entry(key.clone()).or_default().in_baseline = true;
        }

        for (key, per_target) in &pairs.groups {
            let entry = entries.entry(key.clone()).or_default();
            for (target, records) in per_target {
                let presence = ObjectPresence::detect(records);
                if presence.in_baseline() {
                    entry.in_baseline = true;
                }
                let cell = self.evaluate(key, target, presence, records);
                entry.targets.insert(target.clone(), cell);
            }
        }

        let objects = entries
            .into_iter()
            .map(|(key, entry)| {
                let reconciled = self.finish(&key, entry);
                (key, reconciled)
            })
            .collect();

        let mut namespaces = Vec::with_capacity(pairs.targets.len() + 1);
        namespaces.push(self.baseline.clone());
        namespaces.extend(pairs.targets.iter().cloned());

        Reconciliation {
            baseline: self.baseline.clone(),
            namespaces,
            objects,
            skipped_units: pairs.skipped_units,
            skipped_records: pairs.skipped_records,
        }
    }

    fn evaluate(
        &self,
        key: &ObjectKey,
        target: &NamespaceLabel,
        presence: ObjectPresence,
        records: &[OrientedRecord<'_>],
    ) -> NamespaceStatus {
        match presence {
            ObjectPresence::MissingInTarget => NamespaceStatus::whole_object(
                ObjectStatus::Missing,
                details::missing_object(key, target),
            ),
            ObjectPresence::ExtraInTarget => NamespaceStatus::whole_object(
                ObjectStatus::Extra,
                details::extra_object(key, target),
            ),
            ObjectPresence::Present => {
                let differences = records
                    .iter()
                    .filter(|r| !r.is_sentinel())
                    .filter(|r| !self.ignore.is_ignored(r.field_path()))
                    .filter_map(|r| details::describe_field(r, target))
                    .collect();
                NamespaceStatus::from_differences(differences)
            }
        }
    }

    fn finish(&self, key: &ObjectKey, entry: ObjectEntry) -> ObjectReconciliation {
        let overall = OverallStatus::from_target_statuses(entry.targets.values().map(|s| &s.status));

        let baseline_cell = if entry.in_baseline {
            NamespaceStatus::baseline()
        } else {
            NamespaceStatus::whole_object(
                ObjectStatus::Missing,
                details::missing_in_baseline(key, &self.baseline),
            )
        };

        let mut statuses = entry.targets;
        statuses.insert(self.baseline.clone(), baseline_cell);

        ObjectReconciliation { statuses, overall }
    }
}
