//! Defines the core data structures for the impact tree engine.
pub mod table;
pub mod types;

// Re-export key types for convenient access
pub use table::{MergedRow, MergedTable, WorkingRow, WorkingTable};
pub use types::{ActivityRef, Branch, NodeUid, Scope, TraversalEdge, TraversalNode, TraversalParams};
