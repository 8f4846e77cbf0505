//! Edge table normalization.
//!
//! Converts the raw traversal edge sequence into the canonical
//! `(consumer, producer)` table that the ancestry resolver works on.

use crate::store::{NodeUid, TraversalEdge};

/// Canonical table of directed supply edges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeTable {
    pairs: Vec<(NodeUid, NodeUid)>, // (consumer, producer)
}

impl EdgeTable {
    /// Normalizes a raw traversal edge sequence.
    ///
    /// The first edge in traversal order is a self-referential root
    /// placeholder and is discarded. Fewer than two raw edges means the
    /// cutoff excluded everything: the traversal is edge-less and an
    /// empty table is returned. Edges touching the virtual-root sentinel
    /// are dropped as well.
    pub fn from_traversal(edges: &[TraversalEdge]) -> Self {
        if edges.len() < 2 {
            return Self::default();
        }
        let pairs = edges[1..]
            .iter()
            .filter(|e| !e.consumer.is_sentinel() && !e.producer.is_sentinel())
            .map(|e| (e.consumer, e.producer))
            .collect();
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(NodeUid, NodeUid)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All distinct producer uids, in first-seen order.
    pub fn producers(&self) -> Vec<NodeUid> {
        let mut seen = std::collections::HashSet::new();
        self.pairs
            .iter()
            .map(|&(_, producer)| producer)
            .filter(|uid| seen.insert(*uid))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(consumer: i32, producer: i32) -> TraversalEdge {
        TraversalEdge {
            consumer: NodeUid(consumer),
            producer: NodeUid(producer),
        }
    }

    #[test]
    fn drops_the_root_placeholder_edge() {
        let raw = vec![edge(0, 0), edge(0, 1), edge(0, 2)];
        let table = EdgeTable::from_traversal(&raw);
        assert_eq!(
            table.pairs(),
            &[(NodeUid(0), NodeUid(1)), (NodeUid(0), NodeUid(2))]
        );
    }

    #[test]
    fn fewer_than_two_edges_is_edge_less() {
        assert!(EdgeTable::from_traversal(&[]).is_empty());
        assert!(EdgeTable::from_traversal(&[edge(0, 0)]).is_empty());
    }

    #[test]
    fn sentinel_edges_are_filtered() {
        let raw = vec![edge(-1, -1), edge(-1, 0), edge(0, 1)];
        let table = EdgeTable::from_traversal(&raw);
        assert_eq!(table.pairs(), &[(NodeUid(0), NodeUid(1))]);
    }

    #[test]
    fn producers_are_distinct_in_first_seen_order() {
        let raw = vec![edge(0, 0), edge(0, 1), edge(0, 2), edge(2, 4)];
        let table = EdgeTable::from_traversal(&raw);
        assert_eq!(table.producers(), vec![NodeUid(1), NodeUid(2), NodeUid(4)]);
    }
}
