use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A unique, stable identifier for a node within a single traversal.
///
/// The traversal assigns `0` to the functional-unit root and `-1` to a
/// synthetic "virtual root" that is never part of the working table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeUid(pub i32);

impl NodeUid {
    /// The functional-unit root of every traversal.
    pub const ROOT: NodeUid = NodeUid(0);
    /// Synthetic virtual-root marker emitted by the traversal provider.
    pub const SENTINEL: NodeUid = NodeUid(-1);

    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl std::fmt::Display for NodeUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque reference to an activity record in the backing database.
///
/// Only the metadata lookup collaborator can resolve this to a display
/// name; the engine itself treats it as an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityRef(pub i64);

impl std::fmt::Display for ActivityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a node's position relative to the functional unit.
///
/// Scope 1 is the functional unit itself, Scope 2 covers grid-electricity
/// style supply, Scope 3 is everything else upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Scope {
    Direct,
    GridElectricity,
    Upstream,
}

impl From<Scope> for u8 {
    fn from(scope: Scope) -> u8 {
        match scope {
            Scope::Direct => 1,
            Scope::GridElectricity => 2,
            Scope::Upstream => 3,
        }
    }
}

impl TryFrom<u8> for Scope {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Scope::Direct),
            2 => Ok(Scope::GridElectricity),
            3 => Ok(Scope::Upstream),
            other => Err(format!("invalid scope value {other}")),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Ordered root-to-node ancestry path, inclusive of both endpoints.
///
/// Traversal depths are small in practice, so paths live inline.
pub type Branch = SmallVec<[NodeUid; 8]>;

/// A node record as delivered by the external graph traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalNode {
    pub uid: NodeUid,
    pub activity: ActivityRef,
    /// Quantity of the node's reference product produced to satisfy
    /// downstream demand.
    pub supply_amount: f64,
    /// Environmental burden attributable to this node's own activity,
    /// excluding upstream contributions.
    pub direct_emissions: f64,
    /// Distance from the functional-unit root.
    pub depth: u32,
}

/// A directed edge as delivered by the external graph traversal:
/// the consumer draws supply from the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalEdge {
    pub consumer: NodeUid,
    pub producer: NodeUid,
}

/// Numeric thresholds forwarded to the graph traversal provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalParams {
    pub cutoff: f64,
    pub biosphere_cutoff: f64,
    pub max_calc: u32,
}

impl Default for TraversalParams {
    fn default() -> Self {
        Self {
            cutoff: 0.001,
            biosphere_cutoff: 0.001,
            max_calc: 100,
        }
    }
}
