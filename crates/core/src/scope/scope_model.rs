//! Scope selection models.

use serde::{Deserialize, Serialize};

use crate::activities::ActivityDetails;
use crate::holdings::Holding;

/// Which slice of the stores a view is built over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "mode", content = "accountId")]
pub enum ViewScope {
    /// One account's holdings and transactions.
    Single(String),
    /// All accounts merged into one synthetic book.
    Combined,
}

/// Holdings and transactions selected for a scope, ready for analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeData {
    pub holdings: Vec<Holding>,
    /// Sorted by date descending; insertion order breaks ties.
    pub transactions: Vec<ActivityDetails>,
}
