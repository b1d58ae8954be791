use thiserror::Error;

/// Errors surfaced by quote providers.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider cannot be used without an API key.
    #[error("API key not configured for provider {0}")]
    NotConfigured(String),

    /// The provider has no data for the requested symbol.
    #[error("No data found for symbol: {0}")]
    SymbolNotFound(String),

    /// The provider rejected the request or returned an unusable payload.
    #[error("Provider error: {0}")]
    Provider(String),
}
