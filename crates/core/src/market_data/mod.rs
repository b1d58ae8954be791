//! Market data module - quote payloads and the provider boundary.
//!
//! Only the interface lives here. Concrete providers translate their own
//! wire formats into [`Quote`] outside the engine.

mod market_data_errors;
mod market_data_model;
mod market_data_traits;

pub use market_data_errors::MarketDataError;
pub use market_data_model::{Quote, QuoteProviderConfig, QuoteProviderKind};
pub use market_data_traits::QuoteProviderTrait;
