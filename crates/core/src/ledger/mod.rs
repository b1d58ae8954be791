//! Ledger module - keeps holdings consistent with executed trades.

mod ledger_service;
mod reconciler;

#[cfg(test)]
mod reconciler_tests;

// Re-export the public interface
pub use ledger_service::{LedgerService, ReconcileOutcome};
pub use reconciler::{plan, ReconcilePlan, SkipReason};
