//! Value-object tables owned by the engine.
//!
//! Tables are rebuilt per calculation and never mutated in place from the
//! caller's perspective; every stage returns a fresh table.

use super::types::{Branch, NodeUid, Scope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of the unified working table: a single traversal node with its
/// identity, amounts, and root-to-node ancestry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingRow {
    #[serde(rename = "UID")]
    pub uid: NodeUid,
    #[serde(rename = "Scope")]
    pub scope: Scope,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SupplyAmount")]
    pub supply_amount: f64,
    #[serde(rename = "BurdenIntensity")]
    pub burden_intensity: f64,
    #[serde(rename = "Burden(Direct)")]
    pub burden_direct: f64,
    #[serde(rename = "Depth")]
    pub depth: u32,
    /// Root-to-node path, inclusive. `None` for the root, which has no
    /// proper ancestry.
    #[serde(rename = "Branch")]
    pub branch: Option<Branch>,
}

/// The unified working table: one row per real traversal node, ordered by
/// ascending UID.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingTable {
    rows: Vec<WorkingRow>,
}

impl WorkingTable {
    /// Builds a table from unordered rows, establishing the canonical
    /// ascending-UID order.
    pub fn from_rows(mut rows: Vec<WorkingRow>) -> Self {
        rows.sort_by_key(|row| row.uid);
        Self { rows }
    }

    pub fn rows(&self) -> &[WorkingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, uid: NodeUid) -> Option<&WorkingRow> {
        self.rows
            .binary_search_by_key(&uid, |row| row.uid)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    pub fn uids(&self) -> BTreeSet<NodeUid> {
        self.rows.iter().map(|row| row.uid).collect()
    }
}

/// A working row augmented with the isolated user overrides.
///
/// `_USER` cells are populated only where the user-supplied value actually
/// differs from the original; everything else stays null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    #[serde(flatten)]
    pub base: WorkingRow,
    #[serde(rename = "SupplyAmount_USER")]
    pub supply_amount_user: Option<f64>,
    #[serde(rename = "BurdenIntensity_USER")]
    pub burden_intensity_user: Option<f64>,
    #[serde(rename = "Edited?")]
    pub edited: bool,
}

/// Output of the override merger, input to the propagation engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergedTable {
    rows: Vec<MergedRow>,
}

impl MergedTable {
    pub fn from_rows(mut rows: Vec<MergedRow>) -> Self {
        rows.sort_by_key(|row| row.base.uid);
        Self { rows }
    }

    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, uid: NodeUid) -> Option<&MergedRow> {
        self.rows
            .binary_search_by_key(&uid, |row| row.base.uid)
            .ok()
            .map(|idx| &self.rows[idx])
    }
}
