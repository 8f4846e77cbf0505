//! Scope-level burden aggregation for display.

use crate::store::{Scope, WorkingTable};
use serde::{Deserialize, Serialize};

/// Direct burden summed per scope.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScopeTotals {
    pub scope_1: f64,
    pub scope_2: f64,
    pub scope_3: f64,
}

impl ScopeTotals {
    pub fn total(&self) -> f64 {
        self.scope_1 + self.scope_2 + self.scope_3
    }
}

/// Sums `Burden(Direct)` per scope. Scope 3 is computed as the remainder
/// of the grand total, matching how the reporting layer presents it.
pub fn scope_totals(table: &WorkingTable) -> ScopeTotals {
    let sum_where = |scope: Scope| -> f64 {
        table
            .rows()
            .iter()
            .filter(|row| row.scope == scope)
            .map(|row| row.burden_direct)
            .sum()
    };
    let grand_total: f64 = table.rows().iter().map(|row| row.burden_direct).sum();

    let scope_1 = sum_where(Scope::Direct);
    let scope_2 = sum_where(Scope::GridElectricity);
    ScopeTotals {
        scope_1,
        scope_2,
        scope_3: grand_total - scope_1 - scope_2,
    }
}
