//! Override propagation.
//!
//! Applies merged user overrides: burden intensity by direct local
//! substitution, supply amount by nearest-override-wins scaling along the
//! branch, then recomputes every direct burden.

use crate::store::{MergedRow, MergedTable, NodeUid, WorkingRow, WorkingTable};
use rayon::prelude::*;
use std::collections::HashMap;

/// Resolves final `SupplyAmount`, `BurdenIntensity`, and `Burden(Direct)`
/// for every row of a merged table.
///
/// Supply scaling: a row with its own override takes that value exactly.
/// Otherwise the branch is scanned from nearest ancestor to furthest and
/// the first overridden ancestor contributes the scaling ratio
/// `override ÷ ancestor original`. A closer override supersedes a further
/// one. Rows without a branch (the root, or defensively any row the
/// assembler could not place) keep their amount unchanged.
pub fn propagate(merged: &MergedTable) -> WorkingTable {
    // uid -> (user value, original amount at that node)
    let overrides: HashMap<NodeUid, (f64, f64)> = merged
        .rows()
        .iter()
        .filter_map(|row| {
            row.supply_amount_user
                .map(|user| (row.base.uid, (user, row.base.supply_amount)))
        })
        .collect();

    let rows = merged
        .rows()
        .par_iter()
        .map(|row| {
            let supply_amount = final_supply_amount(row, &overrides);
            let burden_intensity = row
                .burden_intensity_user
                .unwrap_or(row.base.burden_intensity);
            WorkingRow {
                supply_amount,
                burden_intensity,
                burden_direct: supply_amount * burden_intensity,
                ..row.base.clone()
            }
        })
        .collect();
    WorkingTable::from_rows(rows)
}

fn final_supply_amount(row: &MergedRow, overrides: &HashMap<NodeUid, (f64, f64)>) -> f64 {
    let branch = match &row.base.branch {
        Some(branch) => branch,
        None => return row.base.supply_amount,
    };
    if let Some(user) = row.supply_amount_user {
        return user;
    }
    for ancestor in branch.iter().rev() {
        if *ancestor == row.base.uid {
            continue;
        }
        if let Some(&(user, original)) = overrides.get(ancestor) {
            return row.base.supply_amount * (user / original);
        }
    }
    row.base.supply_amount
}
