//! Override isolation.
//!
//! Compares the authoritative working table against a user-edited copy
//! and records only the cells that actually changed.

use crate::store::{MergedRow, MergedTable, NodeUid, WorkingRow, WorkingTable};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// The two tables must describe the same node set; neither truncation
    /// nor padding is acceptable.
    #[error("UID sets of original and user tables do not match (missing: {missing:?}, unexpected: {unexpected:?})")]
    UidSetMismatch {
        missing: Vec<NodeUid>,
        unexpected: Vec<NodeUid>,
    },
}

/// Augments the original table with `SupplyAmount_USER` and
/// `BurdenIntensity_USER` columns holding only genuine edits.
///
/// A cell becomes an override iff the user value differs from the
/// original. Two NaNs do not differ, and a NaN user value never records
/// an override: in a nullable column an edit to NaN is indistinguishable
/// from an untouched cell.
pub fn merge_overrides(
    original: &WorkingTable,
    user: &WorkingTable,
) -> Result<MergedTable, MergeError> {
    let original_uids = original.uids();
    let user_uids = user.uids();
    if original_uids != user_uids {
        return Err(MergeError::UidSetMismatch {
            missing: original_uids.difference(&user_uids).copied().collect(),
            unexpected: user_uids.difference(&original_uids).copied().collect(),
        });
    }

    let user_by_uid: HashMap<NodeUid, &WorkingRow> =
        user.rows().iter().map(|row| (row.uid, row)).collect();

    let rows = original
        .rows()
        .iter()
        .map(|row| {
            let user_row = user_by_uid[&row.uid];
            let supply_amount_user = user_cell(row.supply_amount, user_row.supply_amount);
            let burden_intensity_user = user_cell(row.burden_intensity, user_row.burden_intensity);
            MergedRow {
                base: row.clone(),
                supply_amount_user,
                burden_intensity_user,
                edited: supply_amount_user.is_some() || burden_intensity_user.is_some(),
            }
        })
        .collect();
    Ok(MergedTable::from_rows(rows))
}

fn user_cell(original: f64, user: f64) -> Option<f64> {
    if user.is_nan() {
        None
    } else if original.is_nan() || user != original {
        Some(user)
    } else {
        None
    }
}
