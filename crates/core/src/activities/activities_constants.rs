//! Activity classification rules.
//!
//! Brokerage exports label the same economic event many ways; classification
//! walks an ordered keyword table against the uppercased action+description
//! text. Order matters: "SELL TO CLOSE ... FEES" must land on SELL before
//! the FEE rule can see it. Rows that match nothing fall through to FEE at
//! the call site - that fallthrough is the documented lenient default, not
//! an accident.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::activities_model::ActivityType;

/// Contract multiplier applied to option activities.
pub const OPTION_MULTIPLIER: Decimal = dec!(100);

/// Ordered (keywords, activity type) classification rules.
pub const ACTION_RULES: &[(&[&str], ActivityType)] = &[
    (&["BUY"], ActivityType::Buy),
    (&["SELL"], ActivityType::Sell),
    (&["DIVIDEND", "QUAL DIV"], ActivityType::Dividend),
    (&["DEPOSIT"], ActivityType::Deposit),
    (&["WITHDRAWAL"], ActivityType::Withdrawal),
    (&["ASSIGN"], ActivityType::Assignment),
    (&["EXPIR"], ActivityType::Expiry),
    (&["FEE", "COMM"], ActivityType::Fee),
];

/// Classifies a raw action/description pair against [`ACTION_RULES`].
///
/// Returns `None` when no rule matches; the import path maps that to FEE
/// and records a warning.
pub fn classify_action(raw_action: &str, description: &str) -> Option<ActivityType> {
    let text = format!("{} {}", raw_action, description).to_uppercase();
    ACTION_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, activity_type)| *activity_type)
}
