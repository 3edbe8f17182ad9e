//! Comparison data model
//!
//! Types shared by the flattener, reconciler and summary:
//! - `labels.rs` - Object keys and namespace labels
//! - `record.rs` - Field-level comparison records and comparison units
//! - `status.rs` - Per-namespace and overall object statuses

mod labels;
mod record;
mod status;

pub use labels::{NamespaceLabel, ObjectKey};
pub use record::{ComparisonUnit, FieldComparisonRecord, FieldStatus, SENTINEL_VALUE};
pub use status::{NamespaceStatus, ObjectStatus, OverallStatus};
