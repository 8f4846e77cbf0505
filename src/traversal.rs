//! External collaborator interfaces and the composed traversal entry
//! point.
//!
//! The graph traversal and the matrix-based impact calculation live in
//! external libraries; this engine only consumes their completed results.

use crate::graph::{assemble, build_node_table, ActivityLookup, EdgeTable, ScopeTwoRule};
use crate::store::{ActivityRef, NodeUid, TraversalEdge, TraversalNode, TraversalParams, WorkingTable};
use crate::EngineError;
use std::collections::HashMap;
use thiserror::Error;

/// A demand: functional-unit activities and the amounts to assess.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Demand(pub Vec<(ActivityRef, f64)>);

/// An impact-assessment method identifier, e.g.
/// `["IPCC 2021", "climate change", "GWP100"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImpactMethod(pub Vec<String>);

/// Upstream failure reported by a provider. The engine never retries;
/// these are surfaced to the surrounding system as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraversalError {
    #[error("graph traversal failed: {0}")]
    Provider(String),
    #[error("impact score calculation failed: {0}")]
    Score(String),
}

/// Completed output of an external graph traversal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TraversalResult {
    pub nodes: HashMap<NodeUid, TraversalNode>,
    pub edges: Vec<TraversalEdge>,
}

/// Performs the graph traversal for a demand under the given thresholds.
pub trait TraversalProvider {
    fn traverse(
        &self,
        demand: &Demand,
        method: &ImpactMethod,
        params: &TraversalParams,
    ) -> Result<TraversalResult, TraversalError>;
}

/// Computes the root-level aggregate impact score. The score is consumed
/// only as a display value, never by the propagation algorithm.
pub trait ImpactScoreProvider {
    fn total_score(&self, demand: &Demand, method: &ImpactMethod) -> Result<f64, TraversalError>;
}

/// Outcome of a traversal run: either an assembled table or the
/// distinguishable "no edges found" condition (cutoff excluded
/// everything), which calling code reports to the end user.
#[derive(Debug, Clone, PartialEq)]
pub enum TraversalOutcome {
    NoEdges,
    Table(WorkingTable),
}

impl TraversalOutcome {
    pub fn table(&self) -> Option<&WorkingTable> {
        match self {
            TraversalOutcome::Table(table) => Some(table),
            TraversalOutcome::NoEdges => None,
        }
    }
}

/// Runs the external traversal and assembles the working table.
pub fn perform_traversal(
    provider: &dyn TraversalProvider,
    lookup: &dyn ActivityLookup,
    scope2_rule: &ScopeTwoRule,
    demand: &Demand,
    method: &ImpactMethod,
    params: &TraversalParams,
) -> Result<TraversalOutcome, EngineError> {
    let result = provider.traverse(demand, method, params)?;
    let edges = EdgeTable::from_traversal(&result.edges);
    if edges.is_empty() {
        return Ok(TraversalOutcome::NoEdges);
    }
    let node_table = build_node_table(&result.nodes, scope2_rule, lookup)?;
    let table = assemble(node_table, &edges)?;
    Ok(TraversalOutcome::Table(table))
}
