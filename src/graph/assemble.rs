//! Tree assembly: joins the node table with per-producer ancestry paths.

use crate::graph::ancestry::{ParentIndex, StructureError};
use crate::graph::edges::EdgeTable;
use crate::store::{Branch, NodeUid, WorkingTable};
use rayon::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// An edge references a uid with no corresponding node record.
    #[error("edge references unknown node {0}")]
    UnknownEdgeNode(NodeUid),
    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// Attaches a root-to-node branch to every row of the node table.
///
/// Ancestry is resolved once per distinct producer in the edge table and
/// left-joined onto the node rows; the root (never a producer of a
/// normalized edge) keeps a null branch. Row count is preserved: rows
/// with no matching edge keep their node fields and a null branch.
pub fn assemble(node_table: WorkingTable, edges: &EdgeTable) -> Result<WorkingTable, AssembleError> {
    let uids = node_table.uids();
    for &(consumer, producer) in edges.pairs() {
        if !uids.contains(&consumer) {
            return Err(AssembleError::UnknownEdgeNode(consumer));
        }
        if !uids.contains(&producer) {
            return Err(AssembleError::UnknownEdgeNode(producer));
        }
    }

    let index = ParentIndex::build(edges)?;
    let mut branches: HashMap<NodeUid, Branch> = edges
        .producers()
        .into_par_iter()
        .map(|producer| index.branch(producer).map(|branch| (producer, branch)))
        .collect::<Result<_, _>>()?;

    let rows = node_table
        .rows()
        .iter()
        .cloned()
        .map(|mut row| {
            row.branch = branches.remove(&row.uid);
            row
        })
        .collect();
    Ok(WorkingTable::from_rows(rows))
}
