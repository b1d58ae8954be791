//! PulseRisk Core - portfolio reconciliation and risk analytics.
//!
//! This crate contains the whole engine: the ledger reconciler that keeps
//! holdings consistent with transactions, the scope aggregator, the
//! analytics view builder, the deterministic synthetic-series generator,
//! and the brokerage CSV normalizer. It is storage-agnostic and defines
//! repository traits that concrete record stores implement.

pub mod accounts;
pub mod activities;
pub mod analytics;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod ledger;
pub mod lots;
pub mod market_data;
pub mod scope;
pub mod store;

// Re-export common types
pub use analytics::{DashboardService, ViewState};
pub use scope::ViewScope;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
