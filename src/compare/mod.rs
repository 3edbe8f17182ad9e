//! Field comparison
//!
//! Produces the comparison records the reconciler consumes. [`FieldComparator`]
//! is the seam for external comparators; [`FlatMapComparator`] compares
//! flattened manifests directly.

use crate::flatten::FlatObject;
use crate::models::{FieldComparisonRecord, ObjectKey};
use std::collections::{BTreeMap, BTreeSet};

/// Compares the objects of one baseline namespace with one target namespace
#[cfg_attr(test, mockall::automock)]
pub trait FieldComparator {
    /// One record per field path in the union of each object pair, plus a
    /// sentinel record for objects defined on one side only
    fn compare(&self, baseline: &[FlatObject], target: &[FlatObject]) -> Vec<FieldComparisonRecord>;
}

/// Compares flat maps path by path
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatMapComparator;

impl FlatMapComparator {
    pub fn new() -> Self {
        Self
    }
}

impl FieldComparator for FlatMapComparator {
    fn compare(&self, baseline: &[FlatObject], target: &[FlatObject]) -> Vec<FieldComparisonRecord> {
        let left = index_by_key(baseline);
        let right = index_by_key(target);
        let keys: BTreeSet<&ObjectKey> = left.keys().chain(right.keys()).copied().collect();

        let mut records = Vec::new();
        for key in keys {
            match (left.get(key), right.get(key)) {
                (Some(l), Some(r)) => records.extend(compare_objects(key, l, r)),
                (Some(_), None) => records.push(FieldComparisonRecord::missing_object(key)),
                (None, Some(_)) => records.push(FieldComparisonRecord::extra_object(key)),
                (None, None) => {}
            }
        }
        records
    }
}

/// Records for every path in the union of two flat objects, in path order
pub fn compare_objects(
    key: &ObjectKey,
    left: &FlatObject,
    right: &FlatObject,
) -> Vec<FieldComparisonRecord> {
    let object_id = key.object_id();
    let paths: BTreeSet<&str> = left.paths().chain(right.paths()).collect();

    paths
        .into_iter()
        .filter_map(|path| {
            FieldComparisonRecord::from_values(&object_id, path, left.get(path), right.get(path))
        })
        .collect()
}

fn index_by_key(objects: &[FlatObject]) -> BTreeMap<&ObjectKey, &FlatObject> {
    let mut index = BTreeMap::new();
    for object in objects {
        if index.insert(object.key(), object).is_some() {
            tracing::warn!("Duplicate manifest for {}, keeping the last one", object.key());
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::models::FieldStatus;
    use serde_json::json;

    fn deployment(name: &str, replicas: u32) -> FlatObject {
        flatten(&json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": name},
            "spec": {"replicas": replicas}
        }))
        .unwrap()
    }

    #[test]
    fn test_compare_field_statuses() {
        let target = flatten(&json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "web", "labels": {"tier": "front"}},
            "spec": {"replicas": 5}
        }))
        .unwrap();

        let records = FlatMapComparator::new().compare(&[deployment("web", 3)], &[target]);
        let by_path: BTreeMap<&str, FieldStatus> = records
            .iter()
            .filter_map(|r| Some((r.field_path.as_str(), r.status?)))
            .collect();

        assert_eq!(by_path["kind"], FieldStatus::Match);
        assert_eq!(by_path["spec.replicas"], FieldStatus::ValueMismatch);
        assert_eq!(by_path["metadata.labels.tier"], FieldStatus::OnlyInRight);
        assert!(records.iter().all(|r| r.object_id == "Deployment/web"));
    }

    #[test]
    fn test_compare_emits_sentinels() {
        let records =
            FlatMapComparator::new().compare(&[deployment("web", 3)], &[deployment("api", 1)]);

        assert_eq!(records.len(), 2);
        let api = records.iter().find(|r| r.object_id == "Deployment/api").unwrap();
        assert!(api.is_sentinel());
        assert_eq!(api.status, Some(FieldStatus::OnlyInRight));

        let web = records.iter().find(|r| r.object_id == "Deployment/web").unwrap();
        assert!(web.is_sentinel());
        assert_eq!(web.status, Some(FieldStatus::OnlyInLeft));
    }

    #[test]
    fn test_identical_objects_all_match() {
        let records = FlatMapComparator::new().compare(&[deployment("web", 3)], &[deployment("web", 3)]);
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.status == Some(FieldStatus::Match)));
    }
}
