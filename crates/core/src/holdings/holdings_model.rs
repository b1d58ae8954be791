//! Holding domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Kind of instrument a holding or activity refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Stock,
    Option,
    Cash,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "STOCK",
            AssetType::Option => "OPTION",
            AssetType::Cash => "CASH",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call or put side of an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "CALL",
            OptionType::Put => "PUT",
        }
    }
}

/// Contract terms carried by option holdings and activities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionTerms {
    pub underlying: String,
    pub option_type: OptionType,
    pub strike: Decimal,
    pub expiry: NaiveDate,
}

impl OptionTerms {
    /// Validates that the terms are complete enough to book.
    pub fn validate(&self) -> Result<()> {
        if self.underlying.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "underlying".to_string(),
            )));
        }
        if self.strike <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Option strike must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

/// Identity key for manual upserts and ledger reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HoldingKey {
    pub account_id: String,
    pub symbol: String,
    pub asset_type: AssetType,
}

/// A position within an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub account_id: String,
    pub symbol: String,
    pub asset_type: AssetType,
    pub sector: String,
    pub qty: Decimal,
    pub avg_cost: Decimal,
    pub last: Decimal,
    pub prev_close: Decimal,
    pub beta: Decimal,
    pub multiplier: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<OptionTerms>,
    pub updated_at: DateTime<Utc>,
}

impl Holding {
    /// The upsert identity key: at most one holding exists per key.
    pub fn key(&self) -> HoldingKey {
        HoldingKey {
            account_id: self.account_id.clone(),
            symbol: self.symbol.clone(),
            asset_type: self.asset_type,
        }
    }

    /// Grouping key used when merging holdings across accounts.
    pub fn group_key(&self) -> (String, AssetType, Option<OptionType>, Option<Decimal>, Option<NaiveDate>) {
        (
            self.symbol.clone(),
            self.asset_type,
            self.option.as_ref().map(|o| o.option_type),
            self.option.as_ref().map(|o| o.strike),
            self.option.as_ref().map(|o| o.expiry),
        )
    }
}

/// Input model for creating or manually editing a holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    pub account_id: String,
    pub symbol: String,
    pub asset_type: AssetType,
    #[serde(default)]
    pub sector: Option<String>,
    pub qty: Decimal,
    pub avg_cost: Decimal,
    pub last: Decimal,
    pub prev_close: Decimal,
    pub beta: Decimal,
    #[serde(default)]
    pub multiplier: Option<Decimal>,
    #[serde(default)]
    pub option: Option<OptionTerms>,
}

impl NewHolding {
    /// Validates the manual-entry rules. No mutation happens on failure.
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if self.qty <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Quantity must be positive".to_string(),
            )));
        }
        if self.avg_cost < Decimal::ZERO
            || self.last < Decimal::ZERO
            || self.prev_close < Decimal::ZERO
        {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Prices must not be negative".to_string(),
            )));
        }
        if self.asset_type == AssetType::Option {
            match &self.option {
                Some(terms) => terms.validate()?,
                None => {
                    return Err(Error::Validation(ValidationError::InvalidInput(
                        "Underlying, strike, and expiry are required for options".to_string(),
                    )))
                }
            }
        }
        Ok(())
    }

    /// The multiplier to book: at least 1 for options, exactly 1 otherwise.
    pub fn effective_multiplier(&self) -> Decimal {
        if self.asset_type == AssetType::Option {
            self.multiplier.unwrap_or(Decimal::ONE).max(Decimal::ONE)
        } else {
            Decimal::ONE
        }
    }

    /// Uppercased symbol with surrounding whitespace removed.
    pub fn normalized_symbol(&self) -> String {
        self.symbol.trim().to_uppercase()
    }

    /// Sector label, defaulting to "Other" on the manual path.
    pub fn sector_or_default(&self) -> String {
        match self.sector.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Upsert identity key for this draft.
    pub fn key(&self) -> HoldingKey {
        HoldingKey {
            account_id: self.account_id.clone(),
            symbol: self.normalized_symbol(),
            asset_type: self.asset_type,
        }
    }
}

/// Counts reported by a bulk price refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRefreshSummary {
    pub updated: usize,
    pub failed: usize,
}
