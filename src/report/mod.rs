//! Validation reports
//!
//! Wires flattening, comparison, reconciliation and summary into one run and
//! produces the report payload consumed by exporters:
//! - `payload.rs` - Externally produced comparison records
//! - `render.rs` - Plain-text rendering

mod payload;
mod render;

pub use payload::{ComparisonPayload, PayloadError};
pub use render::{RenderOptions, render_text};

use crate::compare::{FieldComparator, FlatMapComparator};
use crate::flatten::FlatObject;
use crate::ignore::IgnoreRules;
use crate::models::{
    ComparisonUnit, FieldComparisonRecord, NamespaceLabel, NamespaceStatus, OverallStatus,
};
use crate::reconcile::{ObjectReconciler, ReconcileError, Reconciliation};
use crate::summary::{Summary, SummaryAggregator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flattened manifests of one namespace
#[derive(Debug, Clone)]
pub struct NamespaceManifests {
    pub label: NamespaceLabel,
    pub objects: Vec<FlatObject>,
}

impl NamespaceManifests {
    pub fn new(label: impl Into<NamespaceLabel>, objects: Vec<FlatObject>) -> Self {
        Self {
            label: label.into(),
            objects,
        }
    }
}

/// One report row: an object with its status in every namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReport {
    pub kind: String,
    pub name: String,
    pub overall: OverallStatus,
    pub statuses: BTreeMap<NamespaceLabel, NamespaceStatus>,
}

/// Report-ready result of one comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub generated_at: DateTime<Utc>,
    pub baseline: NamespaceLabel,
    pub namespaces: Vec<NamespaceLabel>,
    pub objects: Vec<ObjectReport>,
    pub summary: Summary,
}

impl ValidationReport {
    pub fn from_reconciliation(reconciliation: Reconciliation, summary: Summary) -> Self {
        let objects = reconciliation
            .objects
            .into_iter()
            .map(|(key, object)| ObjectReport {
                kind: key.kind,
                name: key.name,
                overall: object.overall,
                statuses: object.statuses,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            baseline: reconciliation.baseline,
            namespaces: reconciliation.namespaces,
            objects,
            summary,
        }
    }

    pub fn all_ok(&self) -> bool {
        self.objects.iter().all(|o| o.overall.is_ok())
    }
}

/// Reconcile and summarise comparison units against `baseline`
pub fn evaluate(
    baseline: NamespaceLabel,
    units: &[ComparisonUnit],
    ignore: &IgnoreRules,
) -> Result<ValidationReport, ReconcileError> {
    let reconciler = ObjectReconciler::new(baseline, ignore)?;
    let reconciliation = reconciler.reconcile(units);
    let summary = SummaryAggregator::new(ignore).summarize(&reconciliation, units);

    tracing::debug!(
        "Reconciled {} objects across {} namespaces",
        summary.total_objects,
        reconciliation.namespaces.len()
    );

    Ok(ValidationReport::from_reconciliation(reconciliation, summary))
}

/// Runs full validations over flattened manifests
pub struct Validator<C = FlatMapComparator> {
    comparator: C,
    ignore: IgnoreRules,
}

impl Validator<FlatMapComparator> {
    pub fn new(ignore: IgnoreRules) -> Self {
        Self::with_comparator(FlatMapComparator::new(), ignore)
    }
}

impl<C: FieldComparator> Validator<C> {
    pub fn with_comparator(comparator: C, ignore: IgnoreRules) -> Self {
        Self { comparator, ignore }
    }

    pub fn ignore_rules(&self) -> &IgnoreRules {
        &self.ignore
    }

    /// One comparison unit per target, baseline on the left
    pub fn build_units(
        &self,
        baseline: &NamespaceManifests,
        targets: &[NamespaceManifests],
    ) -> Vec<ComparisonUnit> {
        let mut units = Vec::with_capacity(targets.len() + 1);

        // Registers objects the baseline defines even when no target shares them
        units.push(ComparisonUnit::new(
            baseline.label.clone(),
            baseline.label.clone(),
            baseline
                .objects
                .iter()
                .map(|o| FieldComparisonRecord::present_object(o.key()))
                .collect(),
        ));

        for target in targets {
            if target.label.same_namespace(&baseline.label) {
                tracing::warn!("Skipping target {}: it is the baseline", target.label);
                continue;
            }
            let records = self.comparator.compare(&baseline.objects, &target.objects);
            units.push(ComparisonUnit::new(
                baseline.label.clone(),
                target.label.clone(),
                records,
            ));
        }

        units
    }

    pub fn validate(
        &self,
        baseline: &NamespaceManifests,
        targets: &[NamespaceManifests],
    ) -> Result<ValidationReport, ReconcileError> {
        let units = self.build_units(baseline, targets);
        evaluate(baseline.label.clone(), &units, &self.ignore)
    }
}
