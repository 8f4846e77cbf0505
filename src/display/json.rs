//! JSON hand-off for web display layers.
//!
//! Rows serialize as an array of objects keyed by the stable column
//! names. serde_json writes non-finite floats as `null`, which is the
//! representation the display layer expects for undefined intensities.

use crate::store::WorkingTable;

pub fn to_json(table: &WorkingTable) -> serde_json::Result<String> {
    serde_json::to_string(table)
}

pub fn to_json_pretty(table: &WorkingTable) -> serde_json::Result<String> {
    serde_json::to_string_pretty(table)
}
