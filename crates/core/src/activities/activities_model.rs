//! Activity domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::{AssetType, OptionTerms};
use crate::{errors::ValidationError, Error, Result};

/// Ledger event categories.
///
/// BUY and SELL drive holding reconciliation; everything else only affects
/// cash and realized P&L downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Buy,
    Sell,
    Dividend,
    Deposit,
    Withdrawal,
    Fee,
    Assignment,
    Expiry,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Buy => "BUY",
            ActivityType::Sell => "SELL",
            ActivityType::Dividend => "DIVIDEND",
            ActivityType::Deposit => "DEPOSIT",
            ActivityType::Withdrawal => "WITHDRAWAL",
            ActivityType::Fee => "FEE",
            ActivityType::Assignment => "ASSIGNMENT",
            ActivityType::Expiry => "EXPIRY",
        }
    }

    /// True for the types whose realized effect is matched against holdings.
    pub fn is_disposal(&self) -> bool {
        matches!(
            self,
            ActivityType::Sell | ActivityType::Assignment | ActivityType::Expiry
        )
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable ledger event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub activity_type: ActivityType,
    pub asset_type: AssetType,
    pub symbol: String,
    pub qty: Decimal,
    pub price: Decimal,
    pub fees: Decimal,
    pub multiplier: Decimal,
    /// Signed cash effect; negative for outflows.
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<OptionTerms>,
    pub created_at: DateTime<Utc>,
}

/// An activity annotated with its source account name for scoped views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetails {
    #[serde(flatten)]
    pub activity: Activity,
    pub account_name: String,
}

/// Input model for creating a new activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub account_id: String,
    pub date: NaiveDate,
    pub activity_type: ActivityType,
    pub asset_type: AssetType,
    pub symbol: String,
    pub qty: Decimal,
    pub price: Decimal,
    pub fees: Decimal,
    #[serde(default)]
    pub multiplier: Option<Decimal>,
    /// Signed cash effect; derived from qty/price/fees when absent or zero.
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub option: Option<OptionTerms>,
}

impl NewActivity {
    /// Validates the new activity data.
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.asset_type == AssetType::Option {
            match &self.option {
                Some(terms) => terms.validate()?,
                None => {
                    return Err(Error::Validation(ValidationError::InvalidInput(
                        "Underlying, strike, and expiry are required for option activity"
                            .to_string(),
                    )))
                }
            }
        }
        Ok(())
    }

    /// The multiplier to book: at least 1 for options, exactly 1 otherwise.
    pub fn effective_multiplier(&self) -> Decimal {
        if self.asset_type == AssetType::Option {
            self.multiplier
                .unwrap_or(super::activities_constants::OPTION_MULTIPLIER)
                .max(Decimal::ONE)
        } else {
            Decimal::ONE
        }
    }

    /// Uppercased symbol, falling back to "-" for cash rows.
    pub fn normalized_symbol(&self) -> String {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            "-".to_string()
        } else {
            symbol
        }
    }

    /// The signed cash amount, derived from the trade legs when not given.
    pub fn resolved_amount(&self) -> Decimal {
        if let Some(amount) = self.amount {
            if !amount.is_zero() {
                return amount;
            }
        }

        let gross = self.qty * self.price * self.effective_multiplier();
        let fallback = self.amount.unwrap_or(Decimal::ZERO);
        match self.activity_type {
            ActivityType::Buy => -(gross + self.fees),
            ActivityType::Sell => gross - self.fees,
            ActivityType::Dividend | ActivityType::Deposit => {
                if gross.is_zero() {
                    fallback.abs()
                } else {
                    gross.abs()
                }
            }
            ActivityType::Fee | ActivityType::Withdrawal => {
                if !gross.is_zero() {
                    -gross.abs()
                } else if !self.fees.is_zero() {
                    -self.fees.abs()
                } else {
                    -fallback.abs()
                }
            }
            ActivityType::Assignment | ActivityType::Expiry => Decimal::ZERO,
        }
    }
}

/// Lenient vs strict handling of defaulted values during bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportMode {
    #[default]
    Lenient,
    Strict,
}

/// A per-row note about a value the lenient import path defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportWarning {
    /// 1-based data row index (the header row is not counted).
    pub row: usize,
    pub message: String,
}

/// Result of a bulk CSV import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub warnings: Vec<ImportWarning>,
}
