use log::{debug, warn};
use std::sync::Arc;

use super::reconciler::{plan, ReconcilePlan, SkipReason};
use crate::activities::{Activity, ActivityType};
use crate::errors::Result;
use crate::holdings::HoldingRepositoryTrait;

/// What a reconciliation run did to the holding store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A new holding was created from a first BUY.
    Created,
    /// An existing holding was adjusted.
    Updated,
    /// The position was closed and its holding deleted.
    Closed,
    /// The activity type does not touch holdings.
    Untouched,
    /// A SELL found no holding under its key and was dropped.
    SkippedMissingHolding,
}

/// Applies executed trades to the holding store.
///
/// The read-modify-write against the store is not atomic: two callers
/// reconciling the same key concurrently can interleave and book a wrong
/// merged state. Bulk callers apply activities sequentially.
#[derive(Clone)]
pub struct LedgerService {
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
}

impl LedgerService {
    /// Creates a new LedgerService instance.
    pub fn new(holding_repository: Arc<dyn HoldingRepositoryTrait>) -> Self {
        Self { holding_repository }
    }

    /// Reconciles one activity against the holding store.
    pub async fn apply(&self, activity: &Activity) -> Result<ReconcileOutcome> {
        if !matches!(
            activity.activity_type,
            ActivityType::Buy | ActivityType::Sell
        ) {
            return Ok(ReconcileOutcome::Untouched);
        }

        let existing = self
            .holding_repository
            .list(Some(activity.account_id.as_str()))?
            .into_iter()
            .find(|holding| {
                holding.symbol == activity.symbol && holding.asset_type == activity.asset_type
            });

        match plan(existing.as_ref(), activity) {
            ReconcilePlan::Insert(new_holding) => {
                let created = self.holding_repository.insert(new_holding).await?;
                debug!(
                    "Opened position {} {} from {}",
                    created.symbol, created.qty, activity.activity_type
                );
                Ok(ReconcileOutcome::Created)
            }
            ReconcilePlan::Update(holding) => {
                self.holding_repository.update(holding).await?;
                Ok(ReconcileOutcome::Updated)
            }
            ReconcilePlan::Delete { holding_id } => {
                self.holding_repository.delete(&holding_id).await?;
                debug!("Closed position {} via {}", activity.symbol, activity.activity_type);
                Ok(ReconcileOutcome::Closed)
            }
            ReconcilePlan::Skip(SkipReason::MissingHolding) => {
                warn!(
                    "SELL of {} {} in account {} has no matching holding; dropped",
                    activity.qty, activity.symbol, activity.account_id
                );
                Ok(ReconcileOutcome::SkippedMissingHolding)
            }
            ReconcilePlan::Skip(SkipReason::NotTrade) => Ok(ReconcileOutcome::Untouched),
        }
    }
}
