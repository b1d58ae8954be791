//! Quote payload and provider configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::market_data_errors::MarketDataError;

/// A normalized market quote, independent of the provider that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub last: Decimal,
    pub prev_close: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub volume: Option<Decimal>,
}

/// Supported quote providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteProviderKind {
    AlphaVantage,
    Finnhub,
    Iex,
    TwelveData,
}

impl QuoteProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteProviderKind::AlphaVantage => "ALPHA_VANTAGE",
            QuoteProviderKind::Finnhub => "FINNHUB",
            QuoteProviderKind::Iex => "IEX",
            QuoteProviderKind::TwelveData => "TWELVE_DATA",
        }
    }
}

/// Configuration handed to a provider at construction time.
///
/// There is no ambient provider state; whoever builds a provider owns the
/// configuration value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteProviderConfig {
    pub kind: QuoteProviderKind,
    pub api_key: String,
}

impl QuoteProviderConfig {
    /// Builds a configuration, rejecting an empty API key up front.
    pub fn new(
        kind: QuoteProviderKind,
        api_key: impl Into<String>,
    ) -> Result<Self, MarketDataError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(MarketDataError::NotConfigured(kind.as_str().to_string()));
        }
        Ok(Self { kind, api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_empty_api_key() {
        let result = QuoteProviderConfig::new(QuoteProviderKind::Finnhub, "  ");
        assert!(matches!(result, Err(MarketDataError::NotConfigured(_))));
    }

    #[test]
    fn test_config_accepts_key() {
        let config = QuoteProviderConfig::new(QuoteProviderKind::AlphaVantage, "demo").unwrap();
        assert_eq!(config.api_key, "demo");
    }
}
