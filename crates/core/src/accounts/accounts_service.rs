use log::debug;
use std::sync::Arc;

use super::accounts_model::{Account, ClearAccountSummary, NewAccount};
use super::accounts_traits::AccountRepositoryTrait;
use crate::activities::ActivityRepositoryTrait;
use crate::errors::Result;
use crate::holdings::HoldingRepositoryTrait;

/// Service for managing accounts.
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    activity_repository: Arc<dyn ActivityRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance with injected dependencies.
    pub fn new(
        repository: Arc<dyn AccountRepositoryTrait>,
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        activity_repository: Arc<dyn ActivityRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            holding_repository,
            activity_repository,
        }
    }

    /// Creates a new account with business validation.
    pub async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!("Creating account: {}", new_account.name);
        self.repository.insert(new_account).await
    }

    /// Retrieves an account by id.
    pub fn get_account(&self, account_id: &str) -> Result<Account> {
        self.repository.get_by_id(account_id)
    }

    /// Lists all accounts, sorted by name.
    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut accounts = self.repository.list()?;
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accounts)
    }

    /// Removes every holding and transaction belonging to one account.
    ///
    /// The account record itself is kept.
    pub async fn clear_account(&self, account_id: &str) -> Result<ClearAccountSummary> {
        let holdings = self.holding_repository.list(Some(account_id))?;
        let activities = self.activity_repository.list(Some(account_id))?;

        let mut holdings_deleted = 0;
        for holding in &holdings {
            holdings_deleted += self.holding_repository.delete(&holding.id).await?;
        }

        let mut activities_deleted = 0;
        for activity in &activities {
            activities_deleted += self.activity_repository.delete(&activity.id).await?;
        }

        debug!(
            "Cleared account {}: {} holdings, {} activities",
            account_id, holdings_deleted, activities_deleted
        );

        Ok(ClearAccountSummary {
            holdings_deleted,
            activities_deleted,
        })
    }

    /// Deletes an account after clearing its holdings and transactions.
    pub async fn delete_account(&self, account_id: &str) -> Result<()> {
        self.clear_account(account_id).await?;
        self.repository.delete(account_id).await?;
        Ok(())
    }
}
