//! Supply-network impact tree engine.
//!
//! Reconstructs the unique root-to-node ancestry of every node in a
//! supply-chain graph traversal, merges user overrides of supply amounts
//! and burden intensities against the last-computed table, propagates
//! supply overrides to descendants with a nearest-override-wins rule, and
//! recomputes each node's direct environmental burden.
//!
//! The traversal itself, the matrix-based impact calculation, and the
//! backing database are external collaborators reached through the traits
//! in [`traversal`] and [`graph::ActivityLookup`]. Every stage here is a
//! pure function from tables to tables; the engine holds no state between
//! invocations and independent traversals can be processed in parallel.

pub mod analysis;
pub mod display;
pub mod graph;
pub mod overrides;
pub mod store;
pub mod traversal;

pub use analysis::{scope_totals, ScopeTotals};
pub use graph::{ActivityLookup, LookupError, ScopeTwoRule, StructureError};
pub use overrides::MergeError;
pub use store::{
    ActivityRef, Branch, MergedRow, MergedTable, NodeUid, Scope, TraversalEdge, TraversalNode,
    TraversalParams, WorkingRow, WorkingTable,
};
pub use traversal::{
    perform_traversal, Demand, ImpactMethod, ImpactScoreProvider, TraversalError, TraversalOutcome,
    TraversalProvider, TraversalResult,
};

use graph::AssembleError;
use std::collections::HashMap;
use thiserror::Error;

/// Any failure of a single engine computation. Failures are local: no
/// previously accepted table is ever partially mutated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Assemble(#[from] AssembleError),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error(transparent)]
    Traversal(#[from] TraversalError),
}

impl From<StructureError> for EngineError {
    fn from(err: StructureError) -> Self {
        EngineError::Assemble(AssembleError::Structure(err))
    }
}

/// Builds the fully assembled working table from raw traversal output:
/// edge normalization, node table construction, ancestry resolution, and
/// tree assembly composed.
pub fn assemble_working_table(
    nodes: &HashMap<NodeUid, TraversalNode>,
    edges: &[TraversalEdge],
    scope2_rule: &ScopeTwoRule,
    lookup: &dyn ActivityLookup,
) -> Result<WorkingTable, EngineError> {
    let edge_table = graph::EdgeTable::from_traversal(edges);
    let node_table = graph::build_node_table(nodes, scope2_rule, lookup)?;
    Ok(graph::assemble(node_table, &edge_table)?)
}

/// Merges a user-edited copy of the table into the original and
/// propagates the recorded overrides, returning the recomputed table.
pub fn apply_user_overrides(
    original: &WorkingTable,
    user: &WorkingTable,
) -> Result<WorkingTable, EngineError> {
    let merged = overrides::merge_overrides(original, user)?;
    Ok(overrides::propagate(&merged))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(uid: i32, supply: f64, emissions: f64, depth: u32) -> (NodeUid, TraversalNode) {
        (
            NodeUid(uid),
            TraversalNode {
                uid: NodeUid(uid),
                activity: ActivityRef(uid as i64 + 100),
                supply_amount: supply,
                direct_emissions: emissions,
                depth,
            },
        )
    }

    fn edge(consumer: i32, producer: i32) -> TraversalEdge {
        TraversalEdge {
            consumer: NodeUid(consumer),
            producer: NodeUid(producer),
        }
    }

    fn lookup() -> HashMap<ActivityRef, String> {
        (0..7)
            .map(|id| (ActivityRef(id + 100), format!("activity {id}")))
            .collect()
    }

    /// Chain 0 -> 1 -> 2 -> 4 -> 5 plus a side branch 0 -> 3.
    ///
    /// Supply amounts are powers of two so that recomputing the burden as
    /// `supply × intensity` reproduces the original emissions bit-exactly.
    fn chain_fixture() -> WorkingTable {
        let nodes: HashMap<NodeUid, TraversalNode> = [
            node(0, 1.0, 0.1, 0),
            node(1, 0.5, 0.05, 1),
            node(2, 0.25, 0.02, 2),
            node(3, 0.125, 0.01, 1),
            node(4, 0.125, 0.01, 3),
            node(5, 0.0625, 0.005, 4),
        ]
        .into_iter()
        .collect();
        let edges = vec![
            edge(0, 0),
            edge(0, 1),
            edge(1, 2),
            edge(0, 3),
            edge(2, 4),
            edge(4, 5),
        ];
        assemble_working_table(&nodes, &edges, &ScopeTwoRule::None, &lookup()).unwrap()
    }

    #[test]
    fn no_op_override_is_idempotent() {
        let original = chain_fixture();
        let result = apply_user_overrides(&original, &original.clone()).unwrap();
        assert_eq!(result, original);
    }

    #[test]
    fn supply_override_scales_the_whole_subtree() {
        // Halve node 1's supply; every descendant scales by 0.25 / 0.5.
        let original = chain_fixture();
        let mut user_rows: Vec<WorkingRow> = original.rows().to_vec();
        user_rows
            .iter_mut()
            .find(|row| row.uid == NodeUid(1))
            .unwrap()
            .supply_amount = 0.25;
        let user = WorkingTable::from_rows(user_rows);

        let result = apply_user_overrides(&original, &user).unwrap();
        assert_eq!(result.get(NodeUid(1)).unwrap().supply_amount, 0.25);
        assert!((result.get(NodeUid(2)).unwrap().supply_amount - 0.125).abs() < 1e-12);
        assert!((result.get(NodeUid(5)).unwrap().supply_amount - 0.03125).abs() < 1e-12);
        // The side branch is untouched.
        assert_eq!(result.get(NodeUid(3)).unwrap().supply_amount, 0.125);
    }

    #[test]
    fn nearest_override_wins_end_to_end() {
        let original = chain_fixture();
        let mut user_rows: Vec<WorkingRow> = original.rows().to_vec();
        for row in user_rows.iter_mut() {
            if row.uid == NodeUid(1) {
                row.supply_amount = 0.25;
            }
            if row.uid == NodeUid(4) {
                row.supply_amount = 0.18;
            }
        }
        let user = WorkingTable::from_rows(user_rows);

        let result = apply_user_overrides(&original, &user).unwrap();
        let node_5 = result.get(NodeUid(5)).unwrap().supply_amount;
        // Scaled by the override at node 4, not the one at node 1.
        assert!((node_5 - 0.0625 * (0.18 / 0.125)).abs() < 1e-12);
        assert!((node_5 - 0.0625 * (0.25 / 0.5)).abs() > 1e-6);
    }

    #[test]
    fn burden_equals_product_after_propagation() {
        let original = chain_fixture();
        let mut user_rows: Vec<WorkingRow> = original.rows().to_vec();
        for row in user_rows.iter_mut() {
            if row.uid == NodeUid(1) {
                row.supply_amount = 0.25;
                row.burden_intensity = 0.9;
            }
        }
        let user = WorkingTable::from_rows(user_rows);

        let result = apply_user_overrides(&original, &user).unwrap();
        for row in result.rows() {
            let product = row.supply_amount * row.burden_intensity;
            if product.is_nan() {
                assert!(row.burden_direct.is_nan());
            } else {
                assert!((row.burden_direct - product).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn mismatched_uid_sets_fail_validation() {
        let original = chain_fixture();
        let truncated = WorkingTable::from_rows(original.rows()[1..].to_vec());
        let err = apply_user_overrides(&original, &truncated).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Merge(MergeError::UidSetMismatch { .. })
        ));
    }

    #[test]
    fn single_node_traversal_assembles_without_branches() {
        let nodes: HashMap<NodeUid, TraversalNode> = [node(0, 1.0, 0.1, 0)].into_iter().collect();
        let table =
            assemble_working_table(&nodes, &[edge(0, 0)], &ScopeTwoRule::None, &lookup()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get(NodeUid(0)).unwrap().branch.is_none());
    }

    #[test]
    fn non_tree_edge_sets_are_reported() {
        let nodes: HashMap<NodeUid, TraversalNode> =
            [node(0, 1.0, 0.1, 0), node(1, 0.5, 0.05, 1), node(2, 0.2, 0.02, 1)]
                .into_iter()
                .collect();
        // Node 1 drawn on by both 0 and 2.
        let edges = vec![edge(0, 0), edge(0, 1), edge(0, 2), edge(2, 1)];
        let err =
            assemble_working_table(&nodes, &edges, &ScopeTwoRule::None, &lookup()).unwrap_err();
        assert_eq!(
            err,
            EngineError::from(StructureError::DuplicateParent(NodeUid(1)))
        );
    }
}
