//! Holding repository trait.

use async_trait::async_trait;

use super::holdings_model::{Holding, NewHolding};
use crate::errors::Result;

/// Trait defining the contract for Holding repository operations.
///
/// Implementations persist positions; the engine never depends on a concrete
/// storage technology.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    /// Inserts a new holding, generating its id.
    async fn insert(&self, new_holding: NewHolding) -> Result<Holding>;

    /// Overwrites an existing holding by id.
    async fn update(&self, holding: Holding) -> Result<Holding>;

    /// Deletes a holding by id. Returns the number of deleted records.
    async fn delete(&self, holding_id: &str) -> Result<usize>;

    /// Retrieves a holding by id.
    fn get_by_id(&self, holding_id: &str) -> Result<Holding>;

    /// Lists holdings, optionally filtered to one account.
    fn list(&self, account_id: Option<&str>) -> Result<Vec<Holding>>;
}
