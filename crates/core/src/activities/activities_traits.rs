//! Activity repository trait.

use async_trait::async_trait;

use super::activities_model::Activity;
use crate::errors::Result;

/// Trait defining the contract for Activity repository operations.
#[async_trait]
pub trait ActivityRepositoryTrait: Send + Sync {
    /// Inserts a fully-built activity record.
    async fn insert(&self, activity: Activity) -> Result<Activity>;

    /// Overwrites an existing activity by id.
    async fn update(&self, activity: Activity) -> Result<Activity>;

    /// Deletes an activity by id. Returns the number of deleted records.
    async fn delete(&self, activity_id: &str) -> Result<usize>;

    /// Retrieves an activity by id.
    fn get_by_id(&self, activity_id: &str) -> Result<Activity>;

    /// Lists activities, optionally filtered to one account.
    fn list(&self, account_id: Option<&str>) -> Result<Vec<Activity>>;
}
