//! Serialization of final tables for export and display collaborators.
pub mod csv;
pub mod json;

pub use csv::{export_filename, to_csv};
pub use json::{to_json, to_json_pretty};
