//! Reconciliation planner.
//!
//! Pure decision logic: given the holding currently booked under an
//! activity's key (if any) and the activity itself, decide what the holding
//! store should do. Executing the decision is the service's job.

use rust_decimal::Decimal;

use crate::activities::{Activity, ActivityType};
use crate::holdings::{Holding, NewHolding};

/// The store mutation a reconciliation run decided on.
#[derive(Debug, Clone)]
pub enum ReconcilePlan {
    /// First BUY for the key: create the holding.
    Insert(NewHolding),
    /// Adjust the existing holding in place.
    Update(Holding),
    /// Position closed (SELL consumed the full quantity, or more).
    Delete { holding_id: String },
    /// Nothing to do, with the reason named.
    Skip(SkipReason),
}

/// Why a reconciliation run left the store untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The activity type never mutates holdings.
    NotTrade,
    /// SELL with no holding under the key; dropped, not an error.
    MissingHolding,
}

/// Decides the store mutation for one activity.
///
/// `existing` must be the holding under the activity's
/// (account, symbol, asset type) key, or `None`.
pub fn plan(existing: Option<&Holding>, activity: &Activity) -> ReconcilePlan {
    match activity.activity_type {
        ActivityType::Buy => plan_buy(existing, activity),
        ActivityType::Sell => plan_sell(existing, activity),
        _ => ReconcilePlan::Skip(SkipReason::NotTrade),
    }
}

fn plan_buy(existing: Option<&Holding>, activity: &Activity) -> ReconcilePlan {
    match existing {
        Some(current) => {
            let new_qty = current.qty + activity.qty;
            let new_avg_cost = if new_qty.is_zero() {
                current.avg_cost
            } else {
                (current.qty * current.avg_cost + activity.qty * activity.price) / new_qty
            };

            let mut updated = current.clone();
            updated.qty = new_qty;
            updated.avg_cost = new_avg_cost;
            updated.prev_close = shifted_prev_close(current, activity.price);
            updated.last = activity.price;
            ReconcilePlan::Update(updated)
        }
        None => ReconcilePlan::Insert(NewHolding {
            account_id: activity.account_id.clone(),
            symbol: activity.symbol.clone(),
            asset_type: activity.asset_type,
            sector: Some("Unknown".to_string()),
            qty: activity.qty,
            avg_cost: activity.price,
            last: activity.price,
            prev_close: activity.price,
            beta: Decimal::ONE,
            multiplier: Some(activity.multiplier.max(Decimal::ONE)),
            option: activity.option.clone(),
        }),
    }
}

fn plan_sell(existing: Option<&Holding>, activity: &Activity) -> ReconcilePlan {
    match existing {
        Some(current) => {
            let new_qty = current.qty - activity.qty;
            if new_qty <= Decimal::ZERO {
                // An over-sell closes the position the same way an exact
                // close does.
                return ReconcilePlan::Delete {
                    holding_id: current.id.clone(),
                };
            }

            let mut updated = current.clone();
            updated.qty = new_qty;
            updated.prev_close = shifted_prev_close(current, activity.price);
            updated.last = activity.price;
            ReconcilePlan::Update(updated)
        }
        None => ReconcilePlan::Skip(SkipReason::MissingHolding),
    }
}

/// The last trade price becomes the new previous close, unless no last
/// price was booked yet.
fn shifted_prev_close(current: &Holding, trade_price: Decimal) -> Decimal {
    if current.last.is_zero() {
        trade_price
    } else {
        current.last
    }
}
