//! Manifest flattening tests
//!
//! Verifies path syntax, determinism and the document filtering rules of the
//! flattener against realistic manifests.

use nsdiff::flatten::{flatten, parse_manifests};
use nsdiff::models::ObjectKey;
use serde_json::json;

const DEPLOYMENT: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: ns-a
  labels:
    app.kubernetes.io/name: web
spec:
  replicas: 3
  template:
    spec:
      containers:
        - name: app
          image: nginx:1.25
          resources:
            limits:
              cpu: 0.5
          ports:
            - containerPort: 80
        - name: sidecar
          image: envoy:1.29
status:
  readyReplicas: 3
"#;

#[test]
fn test_flatten_is_idempotent() {
    let first = parse_manifests(DEPLOYMENT);
    let second = parse_manifests(DEPLOYMENT);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first[0]).unwrap(),
        serde_json::to_string(&second[0]).unwrap()
    );
}

#[test]
fn test_flatten_paths_from_yaml() {
    let objects = parse_manifests(DEPLOYMENT);
    assert_eq!(objects.len(), 1);

    let web = &objects[0];
    assert_eq!(web.key(), &ObjectKey::new("Deployment", "web"));
    assert_eq!(web.get("apiVersion"), Some("apps/v1"));
    assert_eq!(web.get("metadata.labels.app.kubernetes.io/name"), Some("web"));
    assert_eq!(web.get("spec.replicas"), Some("3"));
    assert_eq!(
        web.get("spec.template.spec.containers[0].resources.limits.cpu"),
        Some("0.5")
    );
    assert_eq!(
        web.get("spec.template.spec.containers[0].ports[0].containerPort"),
        Some("80")
    );
    assert_eq!(web.get("spec.template.spec.containers[1].image"), Some("envoy:1.29"));
}

#[test]
fn test_status_is_never_flattened() {
    let objects = parse_manifests(DEPLOYMENT);
    assert!(objects[0].paths().all(|p| !p.starts_with("status")));
}

#[test]
fn test_array_order_sensitivity() {
    let forward = flatten(&json!({
        "kind": "Pod",
        "metadata": {"name": "p"},
        "spec": {"containers": [{"image": "a"}, {"image": "b"}]}
    }))
    .unwrap();
    let reversed = flatten(&json!({
        "kind": "Pod",
        "metadata": {"name": "p"},
        "spec": {"containers": [{"image": "b"}, {"image": "a"}]}
    }))
    .unwrap();

    assert_ne!(forward, reversed);
    assert_eq!(forward.get("spec.containers[0].image"), Some("a"));
    assert_eq!(reversed.get("spec.containers[0].image"), Some("b"));
}

#[test]
fn test_key_order_does_not_matter() {
    let a = flatten(&json!({
        "kind": "Service",
        "metadata": {"name": "api", "labels": {"x": "1", "y": "2"}},
        "spec": {"type": "ClusterIP", "ports": [{"port": 80}]}
    }))
    .unwrap();
    let b = flatten(&json!({
        "spec": {"ports": [{"port": 80}], "type": "ClusterIP"},
        "metadata": {"labels": {"y": "2", "x": "1"}, "name": "api"},
        "kind": "Service"
    }))
    .unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_multi_document_stream_drops_bad_documents() {
    let yaml = r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
---
# missing metadata.name
apiVersion: v1
kind: Secret
metadata:
  namespace: ns-a
---
kind: [unclosed
---
apiVersion: v1
kind: Service
metadata:
  name: api
spec:
  ports:
    - port: 443
"#;

    let objects = parse_manifests(yaml);
    let keys: Vec<String> = objects.iter().map(|o| o.key().to_string()).collect();
    assert_eq!(keys, vec!["ConfigMap/settings", "Service/api"]);
}

#[test]
fn test_list_documents_are_expanded() {
    let yaml = r#"
apiVersion: v1
kind: List
items:
  - apiVersion: v1
    kind: ConfigMap
    metadata:
      name: one
  - apiVersion: v1
    kind: ConfigMap
    metadata:
      name: two
"#;

    let objects = parse_manifests(yaml);
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[1].key(), &ObjectKey::new("ConfigMap", "two"));
}

#[test]
fn test_empty_and_null_values_produce_no_paths() {
    let yaml = r#"
kind: ConfigMap
metadata:
  name: cm
  annotations: {}
  finalizers: []
spec:
  optional: null
"#;

    let objects = parse_manifests(yaml);
    assert_eq!(objects[0].paths().collect::<Vec<_>>(), vec!["kind", "metadata.name"]);
}

#[test]
fn test_empty_stream() {
    assert!(parse_manifests("").is_empty());
    assert!(parse_manifests("---\n---\n").is_empty());
}
