//! In-memory record store.
//!
//! Reference implementation of the repository traits over locked vectors.
//! Insertion order is preserved, which keeps listing order deterministic
//! and lets date-sorted views break ties by arrival.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;
use uuid::Uuid;

use crate::accounts::{Account, AccountRepositoryTrait, NewAccount};
use crate::activities::{Activity, ActivityRepositoryTrait};
use crate::errors::Result;
use crate::holdings::{Holding, HoldingRepositoryTrait, NewHolding};
use crate::Error;

/// An in-memory store backing all three collections.
#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<Vec<Account>>,
    holdings: RwLock<Vec<Holding>>,
    activities: RwLock<Vec<Activity>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepositoryTrait for MemoryStore {
    async fn insert(&self, new_account: NewAccount) -> Result<Account> {
        let account = Account {
            id: new_account
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_account.name,
            created_at: Utc::now(),
        };
        self.accounts.write().unwrap().push(account.clone());
        Ok(account)
    }

    async fn delete(&self, account_id: &str) -> Result<usize> {
        let mut accounts = self.accounts.write().unwrap();
        let before = accounts.len();
        accounts.retain(|account| account.id != account_id);
        Ok(before - accounts.len())
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        self.accounts
            .read()
            .unwrap()
            .iter()
            .find(|account| account.id == account_id)
            .cloned()
            .ok_or_else(|| Error::Repository(format!("Account not found: {}", account_id)))
    }

    fn list(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.read().unwrap().clone())
    }
}

#[async_trait]
impl HoldingRepositoryTrait for MemoryStore {
    async fn insert(&self, new_holding: NewHolding) -> Result<Holding> {
        let holding = Holding {
            id: Uuid::new_v4().to_string(),
            account_id: new_holding.account_id.clone(),
            symbol: new_holding.normalized_symbol(),
            asset_type: new_holding.asset_type,
            sector: new_holding.sector_or_default(),
            qty: new_holding.qty,
            avg_cost: new_holding.avg_cost,
            last: new_holding.last,
            prev_close: new_holding.prev_close,
            beta: new_holding.beta,
            multiplier: new_holding.effective_multiplier(),
            option: new_holding.option,
            updated_at: Utc::now(),
        };
        self.holdings.write().unwrap().push(holding.clone());
        Ok(holding)
    }

    async fn update(&self, mut holding: Holding) -> Result<Holding> {
        holding.updated_at = Utc::now();
        let mut holdings = self.holdings.write().unwrap();
        match holdings.iter_mut().find(|existing| existing.id == holding.id) {
            Some(existing) => {
                *existing = holding.clone();
                Ok(holding)
            }
            None => Err(Error::Repository(format!(
                "Holding not found: {}",
                holding.id
            ))),
        }
    }

    async fn delete(&self, holding_id: &str) -> Result<usize> {
        let mut holdings = self.holdings.write().unwrap();
        let before = holdings.len();
        holdings.retain(|holding| holding.id != holding_id);
        Ok(before - holdings.len())
    }

    fn get_by_id(&self, holding_id: &str) -> Result<Holding> {
        self.holdings
            .read()
            .unwrap()
            .iter()
            .find(|holding| holding.id == holding_id)
            .cloned()
            .ok_or_else(|| Error::Repository(format!("Holding not found: {}", holding_id)))
    }

    fn list(&self, account_id: Option<&str>) -> Result<Vec<Holding>> {
        let holdings = self.holdings.read().unwrap();
        Ok(match account_id {
            Some(account_id) => holdings
                .iter()
                .filter(|holding| holding.account_id == account_id)
                .cloned()
                .collect(),
            None => holdings.clone(),
        })
    }
}

#[async_trait]
impl ActivityRepositoryTrait for MemoryStore {
    async fn insert(&self, activity: Activity) -> Result<Activity> {
        self.activities.write().unwrap().push(activity.clone());
        Ok(activity)
    }

    async fn update(&self, activity: Activity) -> Result<Activity> {
        let mut activities = self.activities.write().unwrap();
        match activities
            .iter_mut()
            .find(|existing| existing.id == activity.id)
        {
            Some(existing) => {
                *existing = activity.clone();
                Ok(activity)
            }
            None => Err(Error::Repository(format!(
                "Activity not found: {}",
                activity.id
            ))),
        }
    }

    async fn delete(&self, activity_id: &str) -> Result<usize> {
        let mut activities = self.activities.write().unwrap();
        let before = activities.len();
        activities.retain(|activity| activity.id != activity_id);
        Ok(before - activities.len())
    }

    fn get_by_id(&self, activity_id: &str) -> Result<Activity> {
        self.activities
            .read()
            .unwrap()
            .iter()
            .find(|activity| activity.id == activity_id)
            .cloned()
            .ok_or_else(|| Error::Repository(format!("Activity not found: {}", activity_id)))
    }

    fn list(&self, account_id: Option<&str>) -> Result<Vec<Activity>> {
        let activities = self.activities.read().unwrap();
        Ok(match account_id {
            Some(account_id) => activities
                .iter()
                .filter(|activity| activity.account_id == account_id)
                .cloned()
                .collect(),
            None => activities.clone(),
        })
    }
}
