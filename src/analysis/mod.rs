//! Read-only analyses over assembled tables.
pub mod scopes;

pub use scopes::{scope_totals, ScopeTotals};
