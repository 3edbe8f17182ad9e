//! Plain-text report rendering

use super::{ObjectReport, ValidationReport};
use crate::models::{ObjectKey, ObjectStatus};
use std::fmt::Write;

/// Text rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Include objects whose overall status is OK
    pub include_identical: bool,
    /// Detail lines shown per namespace cell
    pub max_details: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_identical: true,
            max_details: 20,
        }
    }
}

/// Render a report as deterministic plain text
///
/// The generation timestamp is left out so identical runs render identically.
pub fn render_text(report: &ValidationReport, options: RenderOptions) -> String {
    let mut out = String::new();
    let namespaces: Vec<&str> = report.namespaces.iter().map(|n| n.as_str()).collect();

    let _ = writeln!(out, "Baseline: {}", report.baseline);
    let _ = writeln!(out, "Namespaces: {}", namespaces.join(", "));

    let mut hidden = 0;
    for object in &report.objects {
        if !options.include_identical && object.overall.is_ok() {
            hidden += 1;
            continue;
        }
        out.push('\n');
        render_object(&mut out, report, object, options.max_details);
    }

    if hidden > 0 {
        let _ = writeln!(out, "\n({} matching objects hidden)", hidden);
    }

    let s = &report.summary;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Objects: {} total, {} matched ({:.1}%), {} OK, {} NOK",
        s.total_objects, s.matched_objects, s.object_match_rate, s.ok_objects, s.nok_objects
    );
    let _ = writeln!(
        out,
        "Fields: {} total, {} matches, {} differences, {} ignored ({:.1}% match)",
        s.total_fields, s.total_matches, s.total_differences, s.total_ignored, s.field_match_rate
    );
    let _ = writeln!(out, "Missing: {}, Extra: {}", s.total_missing, s.total_extra);

    out
}

fn render_object(out: &mut String, report: &ValidationReport, object: &ObjectReport, max_details: usize) {
    let key = ObjectKey::new(object.kind.as_str(), object.name.as_str());
    let _ = writeln!(out, "{} [{}]", key, object.overall);

    for namespace in &report.namespaces {
        let Some(cell) = object.statuses.get(namespace) else {
            continue;
        };

        match cell.status {
            ObjectStatus::Different => {
                let noun = if cell.difference_count == 1 {
                    "difference"
                } else {
                    "differences"
                };
                let _ = writeln!(
                    out,
                    "  {}: {} ({} {})",
                    namespace, cell.status, cell.difference_count, noun
                );
            }
            _ => {
                let _ = writeln!(out, "  {}: {}", namespace, cell.status);
            }
        }

        for detail in cell.details.iter().take(max_details) {
            let _ = writeln!(out, "    - {}", detail);
        }
        if cell.details.len() > max_details {
            let _ = writeln!(out, "    ... and {} more", cell.details.len() - max_details);
        }
    }
}
