//! Scope module - SINGLE vs COMBINED view selection.

mod scope_model;
mod scope_service;


// Re-export the public interface
pub use scope_model::{ScopeData, ViewScope};
pub use scope_service::{combine_holdings, ScopeService};
