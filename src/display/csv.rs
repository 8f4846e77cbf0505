//! Delimited-text serialization of the working table.
//!
//! This is the hand-off format for downstream export and display
//! collaborators; the column order is part of the contract.

use crate::store::{Branch, WorkingRow, WorkingTable};
use crate::traversal::ImpactMethod;
use std::fmt::Write;

pub const COLUMNS: [&str; 8] = [
    "UID",
    "Scope",
    "Name",
    "SupplyAmount",
    "BurdenIntensity",
    "Burden(Direct)",
    "Depth",
    "Branch",
];

/// Renders the table as CSV with the stable column order.
pub fn to_csv(table: &WorkingTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", COLUMNS.join(","));
    for row in table.rows() {
        let _ = writeln!(out, "{}", format_row(row));
    }
    out
}

fn format_row(row: &WorkingRow) -> String {
    [
        row.uid.to_string(),
        row.scope.to_string(),
        quote(&row.name),
        format_float(row.supply_amount),
        format_float(row.burden_intensity),
        format_float(row.burden_direct),
        row.depth.to_string(),
        quote(&format_branch(row.branch.as_ref())),
    ]
    .join(",")
}

fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value}")
    }
}

fn format_branch(branch: Option<&Branch>) -> String {
    match branch {
        None => String::new(),
        Some(path) => {
            let ids: Vec<String> = path.iter().map(|uid| uid.to_string()).collect();
            format!("[{}]", ids.join(", "))
        }
    }
}

/// RFC-4180-style quoting: only fields containing a delimiter, quote, or
/// newline are wrapped.
fn quote(field: &str) -> String {
    if field.contains(['"', ',', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// File name for an exported table:
/// `activity='<name>'_method='<segments>'_cutoff=<value>.csv`.
///
/// Spaces in the activity name become underscores and semicolons and
/// commas are stripped; method segments are joined with `-` and spaces
/// become `-`; the cutoff uses a decimal comma.
pub fn export_filename(activity: &str, method: &ImpactMethod, cutoff: f64) -> String {
    let activity = activity.replace(' ', "_").replace([';', ','], "");
    let method = method.0.join("-").replace(' ', "-");
    format!(
        "activity='{}'_method='{}'_cutoff={}.csv",
        activity,
        method,
        cutoff.to_string().replace('.', ",")
    )
}
