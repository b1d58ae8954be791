//! Account repository trait.
//!
//! Defines the contract for account persistence without any storage-specific
//! types, allowing for different record store implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account, generating an id when none is supplied.
    async fn insert(&self, new_account: NewAccount) -> Result<Account>;

    /// Deletes an account by its id.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, account_id: &str) -> Result<usize>;

    /// Retrieves an account by its id.
    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    /// Lists all accounts.
    fn list(&self) -> Result<Vec<Account>>;
}
