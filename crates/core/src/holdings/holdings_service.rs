use log::{debug, warn};
use std::collections::HashSet;
use std::sync::Arc;

use super::holdings_model::{AssetType, Holding, NewHolding, PriceRefreshSummary};
use super::holdings_traits::HoldingRepositoryTrait;
use crate::errors::Result;
use crate::market_data::QuoteProviderTrait;

/// Service for manual holding maintenance and price refresh.
pub struct HoldingService {
    repository: Arc<dyn HoldingRepositoryTrait>,
}

impl HoldingService {
    /// Creates a new HoldingService instance.
    pub fn new(repository: Arc<dyn HoldingRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Creates or overwrites a holding by its identity key.
    ///
    /// A draft matching an existing (account, symbol, asset type) key
    /// replaces that holding in place; otherwise a new holding is inserted.
    pub async fn upsert_holding(&self, draft: NewHolding) -> Result<Holding> {
        draft.validate()?;
        let key = draft.key();

        let existing = self
            .repository
            .list(Some(key.account_id.as_str()))?
            .into_iter()
            .find(|holding| holding.key() == key);

        match existing {
            Some(current) => {
                debug!("Overwriting holding {} for {}", current.id, key.symbol);
                let updated = Holding {
                    id: current.id,
                    account_id: draft.account_id.clone(),
                    symbol: draft.normalized_symbol(),
                    asset_type: draft.asset_type,
                    sector: draft.sector_or_default(),
                    qty: draft.qty,
                    avg_cost: draft.avg_cost,
                    last: draft.last,
                    prev_close: draft.prev_close,
                    beta: draft.beta,
                    multiplier: draft.effective_multiplier(),
                    option: draft.option.clone(),
                    updated_at: current.updated_at,
                };
                self.repository.update(updated).await
            }
            None => self.repository.insert(draft).await,
        }
    }

    /// Overwrites a holding by id, regardless of key.
    pub async fn update_holding(&self, holding_id: &str, draft: NewHolding) -> Result<Holding> {
        draft.validate()?;
        let current = self.repository.get_by_id(holding_id)?;
        let updated = Holding {
            id: current.id,
            account_id: draft.account_id.clone(),
            symbol: draft.normalized_symbol(),
            asset_type: draft.asset_type,
            sector: draft.sector_or_default(),
            qty: draft.qty,
            avg_cost: draft.avg_cost,
            last: draft.last,
            prev_close: draft.prev_close,
            beta: draft.beta,
            multiplier: draft.effective_multiplier(),
            option: draft.option.clone(),
            updated_at: current.updated_at,
        };
        self.repository.update(updated).await
    }

    /// Deletes a holding by id.
    pub async fn delete_holding(&self, holding_id: &str) -> Result<usize> {
        self.repository.delete(holding_id).await
    }

    /// Retrieves a holding by id.
    pub fn get_holding(&self, holding_id: &str) -> Result<Holding> {
        self.repository.get_by_id(holding_id)
    }

    /// Lists holdings, optionally filtered to one account.
    pub fn list_holdings(&self, account_id: Option<&str>) -> Result<Vec<Holding>> {
        self.repository.list(account_id)
    }

    /// Refreshes last/previous-close prices for an account's stock holdings.
    ///
    /// Symbols are fetched once each; every holding carrying the symbol is
    /// updated. A provider failure only skips that symbol.
    pub async fn refresh_prices(
        &self,
        account_id: &str,
        provider: &dyn QuoteProviderTrait,
    ) -> Result<PriceRefreshSummary> {
        let holdings: Vec<Holding> = self
            .repository
            .list(Some(account_id))?
            .into_iter()
            .filter(|holding| holding.asset_type == AssetType::Stock)
            .collect();

        let mut seen = HashSet::new();
        let symbols: Vec<String> = holdings
            .iter()
            .map(|holding| holding.symbol.clone())
            .filter(|symbol| seen.insert(symbol.clone()))
            .collect();

        let mut updated = 0;
        let mut failed = 0;
        for symbol in symbols {
            match provider.fetch_quote(&symbol).await {
                Ok(quote) => {
                    for holding in holdings.iter().filter(|h| h.symbol == symbol) {
                        let mut refreshed = holding.clone();
                        refreshed.last = quote.last;
                        refreshed.prev_close = quote.prev_close;
                        self.repository.update(refreshed).await?;
                        updated += 1;
                    }
                }
                Err(err) => {
                    warn!("Quote refresh failed for {}: {}", symbol, err);
                    failed += 1;
                }
            }
        }

        Ok(PriceRefreshSummary { updated, failed })
    }
}
