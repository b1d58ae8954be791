use chrono::Utc;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::activities_model::{
    Activity, ImportMode, ImportSummary, ImportWarning, NewActivity,
};
use super::activities_traits::ActivityRepositoryTrait;
use super::csv_parser::parse_csv;
use super::import_mapper::{map_rows, ImportedActivity, MappedImport};
use crate::errors::{Result, ValidationError};
use crate::ledger::{LedgerService, ReconcileOutcome};
use crate::Error;

/// Service for managing ledger activities.
pub struct ActivityService {
    activity_repository: Arc<dyn ActivityRepositoryTrait>,
    ledger: LedgerService,
}

impl ActivityService {
    /// Creates a new ActivityService instance with injected dependencies.
    pub fn new(activity_repository: Arc<dyn ActivityRepositoryTrait>, ledger: LedgerService) -> Self {
        Self {
            activity_repository,
            ledger,
        }
    }

    /// Records a validated activity and reconciles holdings for trades.
    pub async fn add_activity(&self, new_activity: NewActivity) -> Result<Activity> {
        new_activity.validate()?;
        let activity = self.build_activity(&new_activity);
        let stored = self.activity_repository.insert(activity).await?;
        self.ledger.apply(&stored).await?;
        Ok(stored)
    }

    /// Overwrites an activity by id.
    ///
    /// Edits adjust the ledger record only; holdings are not re-derived.
    pub async fn update_activity(
        &self,
        activity_id: &str,
        new_activity: NewActivity,
    ) -> Result<Activity> {
        new_activity.validate()?;
        let current = self.activity_repository.get_by_id(activity_id)?;
        let mut activity = self.build_activity(&new_activity);
        activity.id = current.id;
        activity.created_at = current.created_at;
        self.activity_repository.update(activity).await
    }

    /// Deletes an activity by id.
    pub async fn delete_activity(&self, activity_id: &str) -> Result<usize> {
        self.activity_repository.delete(activity_id).await
    }

    /// Retrieves an activity by id.
    pub fn get_activity(&self, activity_id: &str) -> Result<Activity> {
        self.activity_repository.get_by_id(activity_id)
    }

    /// Lists activities, optionally filtered to one account.
    pub fn list_activities(&self, account_id: Option<&str>) -> Result<Vec<Activity>> {
        self.activity_repository.list(account_id)
    }

    /// Imports a brokerage CSV export into one account.
    ///
    /// Rows are normalized, then applied sequentially: each record is
    /// inserted and reconciled before the next one is read, so a SELL can
    /// see the holding an earlier BUY in the same file created.
    pub async fn import_activities(
        &self,
        account_id: &str,
        csv_text: &str,
        mode: ImportMode,
    ) -> Result<ImportSummary> {
        let parsed = parse_csv(csv_text)?;
        let mapped = map_rows(&parsed);

        if mapped.activities.is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "No importable rows found in this file".to_string(),
            )));
        }

        if mode == ImportMode::Strict {
            if let Some(warning) = mapped.warnings.first() {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Row {}: {}",
                    warning.row, warning.message
                ))));
            }
        }

        let MappedImport {
            activities,
            mut warnings,
        } = mapped;

        let mut imported = 0;
        for (index, row) in activities.iter().enumerate() {
            let activity = self.build_imported_activity(account_id, row);
            let stored = self.activity_repository.insert(activity).await?;
            let outcome = self.ledger.apply(&stored).await?;
            if outcome == ReconcileOutcome::SkippedMissingHolding {
                warnings.push(ImportWarning {
                    row: index + 1,
                    message: format!("SELL of {} had no matching holding", stored.symbol),
                });
            }
            imported += 1;
        }

        debug!(
            "Imported {} activities into account {} ({} warnings)",
            imported,
            account_id,
            warnings.len()
        );

        Ok(ImportSummary { imported, warnings })
    }

    fn build_activity(&self, new_activity: &NewActivity) -> Activity {
        Activity {
            id: Uuid::new_v4().to_string(),
            account_id: new_activity.account_id.clone(),
            date: new_activity.date,
            activity_type: new_activity.activity_type,
            asset_type: new_activity.asset_type,
            symbol: new_activity.normalized_symbol(),
            qty: new_activity.qty,
            price: new_activity.price,
            fees: new_activity.fees,
            multiplier: new_activity.effective_multiplier(),
            amount: new_activity.resolved_amount(),
            option: new_activity.option.clone(),
            created_at: Utc::now(),
        }
    }

    fn build_imported_activity(&self, account_id: &str, row: &ImportedActivity) -> Activity {
        Activity {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            date: row.date,
            activity_type: row.activity_type,
            asset_type: row.asset_type,
            symbol: row.symbol.clone(),
            qty: row.qty,
            price: row.price,
            fees: row.fees,
            multiplier: row.multiplier,
            amount: row.amount,
            option: row.option.clone(),
            created_at: Utc::now(),
        }
    }
}
