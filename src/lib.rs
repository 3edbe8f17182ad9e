//! nsdiff library
//!
//! Compares Kubernetes manifests across namespaces field by field. Manifests
//! are flattened into path-keyed scalar maps, compared pairwise against a
//! baseline namespace, reconciled into per-object statuses and summarised.
//!
//! ```
//! use nsdiff::flatten::parse_manifests;
//! use nsdiff::ignore::IgnoreRules;
//! use nsdiff::report::{NamespaceManifests, Validator};
//!
//! let baseline = parse_manifests("kind: Deployment\nmetadata:\n  name: web\nspec:\n  replicas: 3\n");
//! let target = parse_manifests("kind: Deployment\nmetadata:\n  name: web\nspec:\n  replicas: 5\n");
//!
//! let report = Validator::new(IgnoreRules::with_defaults())
//!     .validate(
//!         &NamespaceManifests::new("ns-a", baseline),
//!         &[NamespaceManifests::new("ns-b", target)],
//!     )
//!     .unwrap();
//! assert_eq!(report.summary.total_differences, 1);
//! ```

pub mod compare;
pub mod config;
pub mod flatten;
pub mod ignore;
pub mod models;
pub mod reconcile;
pub mod report;
pub mod summary;

// Re-export commonly used types for convenience
pub use flatten::{FlatObject, flatten, parse_manifests};
pub use ignore::{IgnoreRule, IgnoreRules};
pub use models::{
    ComparisonUnit, FieldComparisonRecord, FieldStatus, NamespaceLabel, NamespaceStatus,
    ObjectKey, ObjectStatus, OverallStatus,
};
pub use reconcile::{ObjectReconciler, Reconciliation};
pub use report::{ValidationReport, Validator};
pub use summary::{Summary, SummaryAggregator};
