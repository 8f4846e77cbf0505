//! User overrides: isolation of edited cells and their propagation.
pub mod merge;
pub mod propagate;

// Re-export key types for convenient access
pub use merge::{merge_overrides, MergeError};
pub use propagate::propagate;
