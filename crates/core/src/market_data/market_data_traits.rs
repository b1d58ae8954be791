use async_trait::async_trait;

use super::market_data_errors::MarketDataError;
use super::market_data_model::Quote;

/// Contract for fetching a live quote for one symbol.
///
/// Implementations translate a specific provider's wire format into
/// [`Quote`]; the engine only ever sees this trait.
#[async_trait]
pub trait QuoteProviderTrait: Send + Sync {
    /// Fetches the current quote for `symbol`.
    ///
    /// Fails with [`MarketDataError::SymbolNotFound`] when the provider has
    /// no data for the symbol, and [`MarketDataError::Provider`] when the
    /// request itself is rejected.
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}
