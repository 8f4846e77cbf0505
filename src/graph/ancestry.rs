//! Ancestry resolution over the normalized edge table.
//!
//! Replaces repeated table filtering with an explicit parent-index map
//! built once per traversal: each non-root node has exactly one incoming
//! edge, so `producer -> consumer` is a function and a root-to-node path
//! is a simple upward walk.

use crate::graph::edges::EdgeTable;
use crate::store::{Branch, NodeUid};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// The edge set violates the tree invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("node {0} has more than one consumer; edge set is not a tree")]
    DuplicateParent(NodeUid),
    #[error("cycle detected in ancestry walk at node {0}")]
    Cycle(NodeUid),
    #[error("node {0} has no path to the root")]
    Disconnected(NodeUid),
    #[error("node {0} does not appear as a producer in the edge table")]
    UnknownNode(NodeUid),
}

/// Map from each producer to its unique consumer.
#[derive(Debug, Clone, Default)]
pub struct ParentIndex {
    parent_of: HashMap<NodeUid, NodeUid>,
}

impl ParentIndex {
    /// Indexes the edge table, rejecting nodes with more than one
    /// incoming edge.
    pub fn build(edges: &EdgeTable) -> Result<Self, StructureError> {
        let mut parent_of = HashMap::with_capacity(edges.len());
        for &(consumer, producer) in edges.pairs() {
            if parent_of.insert(producer, consumer).is_some() {
                return Err(StructureError::DuplicateParent(producer));
            }
        }
        Ok(Self { parent_of })
    }

    /// Traces the root-to-node path for `target`, inclusive.
    ///
    /// The walk prepends parents until a node with no incoming edge is
    /// reached. A visited-set guard detects cycles, and a walk that
    /// terminates anywhere other than the root means the node is
    /// disconnected from the tree.
    pub fn branch(&self, target: NodeUid) -> Result<Branch, StructureError> {
        if !self.parent_of.contains_key(&target) {
            if target.is_root() {
                let mut path = Branch::new();
                path.push(target);
                return Ok(path);
            }
            return Err(StructureError::UnknownNode(target));
        }

        let mut path = Branch::new();
        path.push(target);
        let mut visited: HashSet<NodeUid> = HashSet::new();
        visited.insert(target);

        let mut current = target;
        while let Some(&parent) = self.parent_of.get(&current) {
            if !visited.insert(parent) {
                return Err(StructureError::Cycle(parent));
            }
            path.push(parent);
            current = parent;
        }
        if !current.is_root() {
            return Err(StructureError::Disconnected(target));
        }

        path.reverse();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TraversalEdge;
    use rstest::rstest;

    fn table(pairs: &[(i32, i32)]) -> EdgeTable {
        // Prepend the root placeholder the normalizer always discards.
        let mut raw = vec![TraversalEdge {
            consumer: NodeUid(0),
            producer: NodeUid(0),
        }];
        raw.extend(pairs.iter().map(|&(c, p)| TraversalEdge {
            consumer: NodeUid(c),
            producer: NodeUid(p),
        }));
        EdgeTable::from_traversal(&raw)
    }

    const TREE: &[(i32, i32)] = &[(0, 1), (0, 2), (0, 3), (2, 4), (3, 5), (5, 6)];

    #[rstest]
    #[case(6, &[0, 3, 5, 6])]
    #[case(4, &[0, 2, 4])]
    #[case(1, &[0, 1])]
    #[case(5, &[0, 3, 5])]
    fn traces_root_to_node_paths(#[case] target: i32, #[case] expected: &[i32]) {
        let index = ParentIndex::build(&table(TREE)).unwrap();
        let branch = index.branch(NodeUid(target)).unwrap();
        let got: Vec<i32> = branch.iter().map(|uid| uid.0).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn path_length_matches_depth_plus_one() {
        let index = ParentIndex::build(&table(TREE)).unwrap();
        // Node 6 sits at depth 3 in the example tree.
        assert_eq!(index.branch(NodeUid(6)).unwrap().len(), 4);
    }

    #[test]
    fn root_branch_is_the_singleton_path() {
        let index = ParentIndex::build(&table(TREE)).unwrap();
        let branch = index.branch(NodeUid::ROOT).unwrap();
        assert_eq!(branch.as_slice(), &[NodeUid::ROOT]);
    }

    #[test]
    fn unknown_target_is_a_structural_error() {
        let index = ParentIndex::build(&table(TREE)).unwrap();
        assert_eq!(
            index.branch(NodeUid(42)),
            Err(StructureError::UnknownNode(NodeUid(42)))
        );
    }

    #[test]
    fn duplicate_parent_is_rejected_at_build() {
        let err = ParentIndex::build(&table(&[(0, 1), (2, 1)])).unwrap_err();
        assert_eq!(err, StructureError::DuplicateParent(NodeUid(1)));
    }

    #[test]
    fn cycle_is_detected_not_looped_forever() {
        // 1 -> 2 -> 3 -> 1, disconnected from the root.
        let index = ParentIndex::build(&table(&[(1, 2), (2, 3), (3, 1)])).unwrap();
        assert!(matches!(
            index.branch(NodeUid(2)),
            Err(StructureError::Cycle(_))
        ));
    }

    #[test]
    fn orphan_subtree_is_disconnected() {
        // 7 -> 8 with no path from 7 up to the root.
        let index = ParentIndex::build(&table(&[(0, 1), (7, 8)])).unwrap();
        assert_eq!(
            index.branch(NodeUid(8)),
            Err(StructureError::Disconnected(NodeUid(8)))
        );
    }
}
