//! Run summary
//!
//! Rolls the field records of every baseline pair into global counters and
//! match rates. The object match rate is all-or-nothing: an object counts as
//! matched only when every one of its fields either matches or is ignored, and
//! it is present on both sides of every pair.
//!
//! Rates are percentages rounded to one decimal place; a zero denominator
//! yields `0.0`.

use crate::ignore::IgnoreRules;
use crate::models::{ComparisonUnit, FieldStatus, ObjectKey};
use crate::reconcile::{BaselinePairs, ObjectPresence, Reconciliation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate counters for one comparison run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_objects: usize,
    pub matched_objects: usize,
    pub ok_objects: usize,
    pub nok_objects: usize,
    pub total_fields: usize,
    pub total_matches: usize,
    pub total_ignored: usize,
    pub total_differences: usize,
    /// Objects absent from a target namespace (one per missing sentinel)
    pub total_missing: usize,
    /// Objects present only in a target namespace
    pub total_extra: usize,
    pub field_match_rate: f64,
    pub object_match_rate: f64,
}

/// Field counters for one object across all its target pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectTally {
    pub fields: usize,
    pub matched: usize,
    pub ignored: usize,
    pub differences: usize,
    /// Missing or extra in at least one target
    pub absent: bool,
}

impl ObjectTally {
    pub fn is_matched(&self) -> bool {
        !self.absent && self.matched + self.ignored == self.fields
    }
}

/// Percentage rounded to one decimal place, `0.0` when `denominator` is zero
pub fn rate(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let percent = numerator as f64 / denominator as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}

/// Computes run summaries under one set of ignore rules
#[derive(Debug, Clone, Copy)]
pub struct SummaryAggregator<'a> {
    ignore: &'a IgnoreRules,
}

impl<'a> SummaryAggregator<'a> {
    pub fn new(ignore: &'a IgnoreRules) -> Self {
        Self { ignore }
    }

    pub fn summarize(&self, reconciliation: &Reconciliation, units: &[ComparisonUnit]) -> Summary {
        let pairs = BaselinePairs::collect(units, &reconciliation.baseline);
        let mut summary = Summary::default();
        let mut tallies: BTreeMap<ObjectKey, ObjectTally> = BTreeMap::new();

        for (key, per_target) in &pairs.groups {
            let tally = tallies.entry(key.clone()).or_default();
            for records in per_target.values() {
                match ObjectPresence::detect(records) {
                    ObjectPresence::MissingInTarget => {
                        summary.total_missing += 1;
                        tally.absent = true;
                        continue;
                    }
                    ObjectPresence::ExtraInTarget => {
                        summary.total_extra += 1;
                        tally.absent = true;
                        continue;
                    }
                    ObjectPresence::Present => {}
                }

                for record in records.iter().filter(|r| !r.is_sentinel()) {
                    tally.fields += 1;
                    if self.ignore.is_ignored(record.field_path()) {
                        tally.ignored += 1;
                    } else if record.status() == FieldStatus::Match {
                        tally.matched += 1;
                    } else {
                        tally.differences += 1;
                    }
                }
            }
        }

        for tally in tallies.values() {
            summary.total_fields += tally.fields;
            summary.total_matches += tally.matched;
            summary.total_ignored += tally.ignored;
            summary.total_differences += tally.differences;
        }

        for (key, object) in &reconciliation.objects {
            summary.total_objects += 1;
            if object.overall.is_ok() {
                summary.ok_objects += 1;
            } else {
                summary.nok_objects += 1;
            }
            if tallies.get(key).copied().unwrap_or_default().is_matched() {
                summary.matched_objects += 1;
            }
        }

        summary.field_match_rate = rate(
            summary.total_matches,
            summary.total_fields - summary.total_ignored,
        );
        summary.object_match_rate = rate(summary.matched_objects, summary.total_objects);

        summary
    }
}
