//! Node table construction.
//!
//! Turns raw traversal node records into working rows with resolved
//! display names, burden intensity, and scope classification.

use crate::store::{ActivityRef, NodeUid, Scope, TraversalNode, WorkingRow, WorkingTable};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Failure to resolve an activity reference to metadata.
///
/// Both variants are input-validation failures of the backing database,
/// not engine defects; a node table build fails as a whole on the first
/// unresolvable row, partial tables are never exposed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("activity {0} not found in the database")]
    NotFound(ActivityRef),
    #[error("activity {0} is ambiguous: {1} records match")]
    Ambiguous(ActivityRef, usize),
}

/// Resolves opaque activity references to display metadata.
pub trait ActivityLookup {
    fn display_name(&self, activity: ActivityRef) -> Result<String, LookupError>;
}

impl ActivityLookup for HashMap<ActivityRef, String> {
    fn display_name(&self, activity: ActivityRef) -> Result<String, LookupError> {
        self.get(&activity)
            .cloned()
            .ok_or(LookupError::NotFound(activity))
    }
}

/// Rule deciding which activities classify as Scope 2.
///
/// Scope 2 is meant for grid-electricity style supply; which activities
/// qualify depends on the backing database, so the caller supplies the
/// rule. The default matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScopeTwoRule {
    #[default]
    None,
    Activities(HashSet<ActivityRef>),
}

impl ScopeTwoRule {
    pub fn matches(&self, activity: ActivityRef) -> bool {
        match self {
            ScopeTwoRule::None => false,
            ScopeTwoRule::Activities(set) => set.contains(&activity),
        }
    }
}

/// Builds one working row per real traversal node.
///
/// The virtual-root sentinel is skipped. Scope 1 is the functional unit,
/// Scope 2 whatever the rule accepts, Scope 3 everything else. A zero
/// supply amount yields an undefined (NaN) burden intensity, which flows
/// through unmodified. Branches are attached later by the assembler.
pub fn build_node_table(
    nodes: &HashMap<NodeUid, TraversalNode>,
    rule: &ScopeTwoRule,
    lookup: &dyn ActivityLookup,
) -> Result<WorkingTable, LookupError> {
    let mut rows = Vec::with_capacity(nodes.len());
    for node in nodes.values() {
        if node.uid.is_sentinel() {
            continue;
        }
        let scope = if node.uid.is_root() {
            Scope::Direct
        } else if rule.matches(node.activity) {
            Scope::GridElectricity
        } else {
            Scope::Upstream
        };
        rows.push(WorkingRow {
            uid: node.uid,
            scope,
            name: lookup.display_name(node.activity)?,
            supply_amount: node.supply_amount,
            burden_intensity: burden_intensity(node.direct_emissions, node.supply_amount),
            burden_direct: node.direct_emissions,
            depth: node.depth,
            branch: None,
        });
    }
    Ok(WorkingTable::from_rows(rows))
}

/// Burden per unit of supply. Zero supply makes the intensity undefined;
/// IEEE division would give ±inf for nonzero emissions, so the NaN is
/// produced explicitly.
fn burden_intensity(direct_emissions: f64, supply_amount: f64) -> f64 {
    if supply_amount == 0.0 {
        f64::NAN
    } else {
        direct_emissions / supply_amount
    }
}
