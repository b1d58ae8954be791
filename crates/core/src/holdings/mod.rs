//! Holdings module - domain models, services, and traits.

mod holdings_model;
mod holdings_service;
mod holdings_traits;

#[cfg(test)]
mod holdings_model_tests;


// Re-export the public interface
pub use holdings_model::{
    AssetType, Holding, HoldingKey, NewHolding, OptionTerms, OptionType, PriceRefreshSummary,
};
pub use holdings_service::HoldingService;
pub use holdings_traits::HoldingRepositoryTrait;
