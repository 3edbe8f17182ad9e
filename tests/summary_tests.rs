//! Summary aggregation tests
//!
//! Cover the all-or-nothing object rule, ignore accounting and the rate
//! rounding that report exporters rely on.

use nsdiff::ignore::IgnoreRules;
use nsdiff::models::{ComparisonUnit, FieldComparisonRecord, NamespaceLabel, ObjectKey};
use nsdiff::reconcile::ObjectReconciler;
use nsdiff::summary::{Summary, SummaryAggregator};

fn field(object: &str, path: &str, left: &str, right: &str) -> FieldComparisonRecord {
    FieldComparisonRecord::from_values(object, path, Some(left), Some(right))
        .expect("both sides present")
}

fn summarize(units: &[ComparisonUnit], rules: &IgnoreRules) -> Summary {
    let reconciler = ObjectReconciler::new(NamespaceLabel::new("ns-a"), rules).unwrap();
    let reconciliation = reconciler.reconcile(units);
    SummaryAggregator::new(rules).summarize(&reconciliation, units)
}

#[test]
fn test_concrete_scenario_summary() {
    let web = ObjectKey::new("Deployment", "web");
    let units = vec![
        ComparisonUnit::new(
            "ns-a",
            "ns-b",
            vec![
                field("Deployment/web", "apiVersion", "apps/v1", "apps/v1"),
                field("Deployment/web", "kind", "Deployment", "Deployment"),
                field("Deployment/web", "metadata.name", "web", "web"),
                field("Deployment/web", "spec.replicas", "3", "5"),
            ],
        ),
        ComparisonUnit::new("ns-a", "ns-c", vec![FieldComparisonRecord::missing_object(&web)]),
    ];

    let summary = summarize(&units, &IgnoreRules::with_defaults());
    assert_eq!(summary.total_objects, 1);
    assert_eq!(summary.total_fields, 4);
    assert_eq!(summary.total_matches, 3);
    assert_eq!(summary.total_differences, 1);
    assert_eq!(summary.total_missing, 1);
    assert_eq!(summary.total_extra, 0);
    assert_eq!(summary.matched_objects, 0);
    assert_eq!(summary.nok_objects, 1);
    assert_eq!(summary.object_match_rate, 0.0);
    assert_eq!(summary.field_match_rate, 75.0);
}

#[test]
fn test_all_or_nothing_object_rule() {
    let mut records: Vec<FieldComparisonRecord> = (0..9)
        .map(|i| field("ConfigMap/settings", &format!("spec.data.key{}", i), "v", "v"))
        .collect();
    records.push(field("ConfigMap/settings", "spec.data.key9", "v", "w"));

    let mut other: Vec<FieldComparisonRecord> = (0..3)
        .map(|i| field("ConfigMap/other", &format!("spec.data.key{}", i), "v", "v"))
        .collect();
    records.append(&mut other);

    let units = vec![ComparisonUnit::new("ns-a", "ns-b", records)];
    let summary = summarize(&units, &IgnoreRules::with_defaults());

    assert_eq!(summary.total_objects, 2);
    assert_eq!(summary.matched_objects, 1);
    assert_eq!(summary.object_match_rate, 50.0);
    assert_eq!(summary.total_fields, 13);
    assert_eq!(summary.total_matches, 12);
    assert_eq!(summary.field_match_rate, 92.3);
}

#[test]
fn test_ignored_mismatch_counts_as_ignored() {
    let units = vec![ComparisonUnit::new(
        "ns-a",
        "ns-b",
        vec![
            field("Service/api", "kind", "Service", "Service"),
            field("Service/api", "metadata.namespace", "ns-a", "ns-b"),
            field("Service/api", "spec.clusterIP", "10.0.0.1", "10.0.0.2"),
        ],
    )];

    let rules = IgnoreRules::with_custom(["spec.clusterIP"]);
    let summary = summarize(&units, &rules);

    assert_eq!(summary.total_fields, 3);
    assert_eq!(summary.total_ignored, 2);
    assert_eq!(summary.total_differences, 0);
    assert_eq!(summary.total_matches, 1);
    assert_eq!(summary.field_match_rate, 100.0);
    // matched + ignored covers every field
    assert_eq!(summary.matched_objects, 1);
    assert_eq!(summary.ok_objects, 1);
}

#[test]
fn test_status_records_from_cluster_sources_are_ignored_by_default() {
    let units = vec![ComparisonUnit::new(
        "ns-a",
        "ns-b",
        vec![
            field("Deployment/web", "spec.replicas", "3", "3"),
            field("Deployment/web", "status.readyReplicas", "3", "1"),
            field("Deployment/web", "status.conditions[0].status", "True", "False"),
        ],
    )];

    let summary = summarize(&units, &IgnoreRules::with_defaults());
    assert_eq!(summary.total_ignored, 2);
    assert_eq!(summary.total_differences, 0);
    assert_eq!(summary.ok_objects, 1);
}

#[test]
fn test_extra_objects_never_match() {
    let api = ObjectKey::new("Service", "api");
    let units = vec![ComparisonUnit::new(
        "ns-a",
        "ns-b",
        vec![FieldComparisonRecord::extra_object(&api)],
    )];

    let summary = summarize(&units, &IgnoreRules::with_defaults());
    assert_eq!(summary.total_objects, 1);
    assert_eq!(summary.total_extra, 1);
    assert_eq!(summary.total_fields, 0);
    assert_eq!(summary.matched_objects, 0);
    assert_eq!(summary.field_match_rate, 0.0);
}

#[test]
fn test_zero_denominators_resolve_to_zero() {
    let units = vec![ComparisonUnit::new(
        "ns-a",
        "ns-b",
        vec![field("Deployment/web", "status.phase", "Running", "Pending")],
    )];

    let summary = summarize(&units, &IgnoreRules::with_defaults());
    assert_eq!(summary.total_fields, 1);
    assert_eq!(summary.total_ignored, 1);
    assert_eq!(summary.field_match_rate, 0.0);
    assert!(!summary.field_match_rate.is_nan());
}

#[test]
fn test_summarize_is_idempotent() {
    let units = vec![ComparisonUnit::new(
        "ns-a",
        "ns-b",
        vec![field("Deployment/web", "spec.replicas", "3", "4")],
    )];
    let rules = IgnoreRules::with_defaults();
    let reconciler = ObjectReconciler::new(NamespaceLabel::new("ns-a"), &rules).unwrap();
    let reconciliation = reconciler.reconcile(&units);
    let aggregator = SummaryAggregator::new(&rules);

    assert_eq!(
        aggregator.summarize(&reconciliation, &units),
        aggregator.summarize(&reconciliation, &units)
    );
}

#[test]
fn test_summary_wire_names() {
    let value = serde_json::to_value(Summary::default()).unwrap();
    for key in [
        "totalObjects",
        "totalFields",
        "totalMatches",
        "totalIgnored",
        "totalDifferences",
        "totalMissing",
        "fieldMatchRate",
        "objectMatchRate",
    ] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
}
