//! Manifest flattening
//!
//! Turns a nested Kubernetes manifest into a flat map of dot/bracket paths to
//! scalar string values. Only `kind`, `apiVersion` and the `metadata` and
//! `spec` subtrees are walked; `status` and any other top-level section never
//! produce paths.
//!
//! Path syntax:
//! - `.key` - map entry (`spec.template.metadata.name`)
//! - `[index]` - list element, positional (`spec.containers[0].image`)

use crate::models::ObjectKey;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Root scalars copied verbatim
const ROOT_SCALARS: &[&str] = &["kind", "apiVersion"];

/// Root sections walked recursively
const ROOT_SECTIONS: &[&str] = &["metadata", "spec"];

/// A manifest reduced to path-keyed scalar values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatObject {
    #[serde(skip)]
    key: ObjectKey,
    #[serde(flatten)]
    fields: BTreeMap<String, String>,
}

impl FlatObject {
    pub fn key(&self) -> &ObjectKey {
        &self.key
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.fields.get(path).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

/// Flatten one manifest document
///
/// Returns `None` for documents without a string `kind` or `metadata.name`.
pub fn flatten(document: &Value) -> Option<FlatObject> {
    let kind = document.get("kind").and_then(Value::as_str);
    let name = document
        .get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str);

    let (kind, name) = match (kind, name) {
        (Some(kind), Some(name)) if !kind.is_empty() && !name.is_empty() => (kind, name),
        _ => {
            tracing::debug!("Dropping manifest without kind or metadata.name");
            return None;
        }
    };

    let mut fields = BTreeMap::new();
    for root in ROOT_SCALARS.iter().chain(ROOT_SECTIONS) {
        if let Some(value) = document.get(*root) {
            flatten_value(root, value, &mut fields);
        }
    }

    Some(FlatObject {
        key: ObjectKey::new(kind, name),
        fields,
    })
}

/// Walk `value` and emit one entry per scalar leaf under `prefix`
pub fn flatten_value(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(&format!("{}[{}]", prefix, index), item, out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_value(&path, item, out);
            }
        }
        scalar => {
            out.insert(prefix.to_string(), scalar_to_string(scalar));
        }
    }
}

/// Uniform string conversion for leaf values
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Parse a YAML stream and flatten every manifest in it
///
/// Documents are separated by `---` lines. `List` documents (as produced by
/// `kubectl get -o yaml`) contribute their `items`. Documents that fail to
/// parse or lack an identity are dropped so one bad document never blocks
/// the rest of the stream.
pub fn parse_manifests(yaml: &str) -> Vec<FlatObject> {
    let mut objects = Vec::new();

    for doc in split_documents(yaml) {
        let value: Value = match serde_yaml::from_str(&doc) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Failed to parse YAML document: {}", e);
                continue;
            }
        };

        for manifest in expand_lists(value) {
            if let Some(flat) = flatten(&manifest) {
                objects.push(flat);
            }
        }
    }

    tracing::debug!("Flattened {} manifests", objects.len());
    objects
}

fn split_documents(yaml: &str) -> Vec<String> {
    let mut documents = Vec::new();
    let mut current = String::new();

    for line in yaml.lines() {
        if line == "---" || line.starts_with("--- ") || line.trim_end() == "---" {
            documents.push(std::mem::take(&mut current));
            continue;
        }
        current.push_str(line);
        current.push('\n');
    }
    documents.push(current);

    documents
        .into_iter()
        .filter(|doc| {
            doc.lines()
                .any(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
        })
        .collect()
}

fn expand_lists(value: Value) -> Vec<Value> {
    let is_list = value
        .get("kind")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.ends_with("List"))
        && value.get("items").is_some_and(Value::is_array);

    if !is_list {
        return vec![value];
    }

    match value {
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => items.into_iter().flat_map(expand_lists).collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_basic() {
        let doc = json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "web", "labels": {"app": "web"}},
            "spec": {"replicas": 3, "paused": false}
        });

        let flat = flatten(&doc).unwrap();
        assert_eq!(flat.key(), &ObjectKey::new("Deployment", "web"));
        assert_eq!(flat.get("kind"), Some("Deployment"));
        assert_eq!(flat.get("apiVersion"), Some("apps/v1"));
        assert_eq!(flat.get("metadata.name"), Some("web"));
        assert_eq!(flat.get("metadata.labels.app"), Some("web"));
        assert_eq!(flat.get("spec.replicas"), Some("3"));
        assert_eq!(flat.get("spec.paused"), Some("false"));
        assert_eq!(flat.len(), 6);
    }

    #[test]
    fn test_flatten_arrays_use_index_paths() {
        let doc = json!({
            "kind": "Pod",
            "metadata": {"name": "p"},
            "spec": {"containers": [{"image": "a"}, {"image": "b", "args": ["x", "y"]}]}
        });

        let flat = flatten(&doc).unwrap();
        assert_eq!(flat.get("spec.containers[0].image"), Some("a"));
        assert_eq!(flat.get("spec.containers[1].image"), Some("b"));
        assert_eq!(flat.get("spec.containers[1].args[1]"), Some("y"));
    }

    #[test]
    fn test_flatten_skips_nulls_and_empty_collections() {
        let doc = json!({
            "kind": "ConfigMap",
            "metadata": {"name": "cm", "annotations": {}, "finalizers": [], "labels": null},
            "spec": {"value": null}
        });

        let flat = flatten(&doc).unwrap();
        assert_eq!(flat.paths().collect::<Vec<_>>(), vec!["kind", "metadata.name"]);
    }

    #[test]
    fn test_flatten_excludes_other_sections() {
        let doc = json!({
            "kind": "ConfigMap",
            "metadata": {"name": "cm"},
            "data": {"key": "value"},
            "status": {"phase": "Active"}
        });

        let flat = flatten(&doc).unwrap();
        assert!(flat.paths().all(|p| !p.starts_with("data") && !p.starts_with("status")));
    }

    #[test]
    fn test_flatten_requires_identity() {
        assert!(flatten(&json!({"metadata": {"name": "x"}})).is_none());
        assert!(flatten(&json!({"kind": "Service"})).is_none());
        assert!(flatten(&json!({"kind": "Service", "metadata": {"name": 5}})).is_none());
        assert!(flatten(&json!("just a string")).is_none());
    }

    #[test]
    fn test_split_documents() {
        let yaml = "---\nkind: A\n---\n# only a comment\n---\nkind: B\n";
        let docs = split_documents(yaml);
        assert_eq!(docs.len(), 2);
        assert!(docs[0].contains("kind: A"));
        assert!(docs[1].contains("kind: B"));
    }

    #[test]
    fn test_expand_nested_list() {
        let list = json!({
            "kind": "List",
            "items": [
                {"kind": "Service", "metadata": {"name": "a"}},
                {"kind": "ServiceList", "items": [{"kind": "Service", "metadata": {"name": "b"}}]}
            ]
        });
        assert_eq!(expand_lists(list).len(), 2);
    }
}
