use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::scope_model::{ScopeData, ViewScope};
use crate::accounts::AccountRepositoryTrait;
use crate::activities::{Activity, ActivityDetails, ActivityRepositoryTrait};
use crate::errors::Result;
use crate::holdings::{Holding, HoldingRepositoryTrait};

/// Selects and merges per-account records into one scope.
pub struct ScopeService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    activity_repository: Arc<dyn ActivityRepositoryTrait>,
}

impl ScopeService {
    /// Creates a new ScopeService instance with injected dependencies.
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        activity_repository: Arc<dyn ActivityRepositoryTrait>,
    ) -> Self {
        Self {
            account_repository,
            holding_repository,
            activity_repository,
        }
    }

    /// Loads the holdings and transactions for a scope.
    pub fn load(&self, scope: &ViewScope) -> Result<ScopeData> {
        let account_names: HashMap<String, String> = self
            .account_repository
            .list()?
            .into_iter()
            .map(|account| (account.id, account.name))
            .collect();

        let (holdings, activities) = match scope {
            ViewScope::Single(account_id) => (
                self.holding_repository.list(Some(account_id.as_str()))?,
                self.activity_repository.list(Some(account_id.as_str()))?,
            ),
            ViewScope::Combined => (
                combine_holdings(self.holding_repository.list(None)?),
                self.activity_repository.list(None)?,
            ),
        };

        let mut transactions: Vec<ActivityDetails> = activities
            .into_iter()
            .map(|activity| annotate(activity, &account_names))
            .collect();
        // Stable sort: same-day transactions keep their insertion order.
        transactions.sort_by(|a, b| b.activity.date.cmp(&a.activity.date));

        Ok(ScopeData {
            holdings,
            transactions,
        })
    }
}

fn annotate(activity: Activity, account_names: &HashMap<String, String>) -> ActivityDetails {
    let account_name = account_names
        .get(&activity.account_id)
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string());
    ActivityDetails {
        activity,
        account_name,
    }
}

/// Merges holdings across accounts by contract identity.
///
/// Within a group, avg cost / last / previous close / beta combine
/// quantity-weighted; a combined quantity of zero falls back to a divisor
/// of 1. The first holding seen supplies the non-merged fields, and group
/// order follows first appearance.
pub fn combine_holdings(holdings: Vec<Holding>) -> Vec<Holding> {
    let mut order: Vec<Holding> = Vec::new();
    let mut index_by_key: HashMap<_, usize> = HashMap::new();

    for item in holdings {
        match index_by_key.get(&item.group_key()) {
            None => {
                index_by_key.insert(item.group_key(), order.len());
                order.push(item);
            }
            Some(&slot) => {
                let existing = &mut order[slot];
                let qty_a = existing.qty;
                let qty_b = item.qty;
                let total_qty = qty_a + qty_b;
                let denominator = if total_qty.is_zero() {
                    Decimal::ONE
                } else {
                    total_qty
                };

                existing.avg_cost = (existing.avg_cost * qty_a + item.avg_cost * qty_b) / denominator;
                existing.last = (existing.last * qty_a + item.last * qty_b) / denominator;
                existing.prev_close =
                    (existing.prev_close * qty_a + item.prev_close * qty_b) / denominator;
                existing.beta = (existing.beta * qty_a + item.beta * qty_b) / denominator;
                existing.qty = total_qty;
            }
        }
    }

    order
}
