//! Reconstruction of the supply tree from raw traversal output.
pub mod ancestry;
pub mod assemble;
pub mod edges;
pub mod nodes;

// Re-export key types for convenient access
pub use ancestry::{ParentIndex, StructureError};
pub use assemble::{assemble, AssembleError};
pub use edges::EdgeTable;
pub use nodes::{build_node_table, ActivityLookup, LookupError, ScopeTwoRule};
