//! Demo data set.
//!
//! Seeds an empty store with the sample book used by tests and first-run
//! sessions: two accounts, a seven-position brokerage book including one
//! option contract, its recent transaction history, and three closed lots.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::memory::MemoryStore;
use crate::accounts::{AccountRepositoryTrait, NewAccount};
use crate::activities::{Activity, ActivityRepositoryTrait, ActivityType};
use crate::errors::Result;
use crate::holdings::{AssetType, HoldingRepositoryTrait, NewHolding, OptionTerms, OptionType};
use crate::lots::{BasisMethod, TaxLot};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// Seeds the demo book into an empty store. A store that already has
/// accounts is left untouched.
pub async fn seed_demo_data(store: &MemoryStore) -> Result<()> {
    if !AccountRepositoryTrait::list(store)?.is_empty() {
        return Ok(());
    }

    let brokerage = AccountRepositoryTrait::insert(
        store,
        NewAccount {
            id: None,
            name: "Schwab Brokerage".to_string(),
        },
    )
    .await?;
    AccountRepositoryTrait::insert(
        store,
        NewAccount {
            id: None,
            name: "Schwab IRA".to_string(),
        },
    )
    .await?;

    for holding in sample_holdings(&brokerage.id) {
        HoldingRepositoryTrait::insert(store, holding).await?;
    }
    for activity in sample_activities(&brokerage.id) {
        ActivityRepositoryTrait::insert(store, activity).await?;
    }

    Ok(())
}

fn stock(account_id: &str, symbol: &str, sector: &str, qty: Decimal, avg_cost: Decimal, last: Decimal, prev_close: Decimal, beta: Decimal) -> NewHolding {
    NewHolding {
        account_id: account_id.to_string(),
        symbol: symbol.to_string(),
        asset_type: AssetType::Stock,
        sector: Some(sector.to_string()),
        qty,
        avg_cost,
        last,
        prev_close,
        beta,
        multiplier: None,
        option: None,
    }
}

fn sample_holdings(account_id: &str) -> Vec<NewHolding> {
    let mut holdings = vec![
        stock(account_id, "AAPL", "Technology", dec!(120), dec!(148.3), dec!(198.2), dec!(196.5), dec!(1.08)),
        stock(account_id, "MSFT", "Technology", dec!(88), dec!(312.7), dec!(417.3), dec!(420.1), dec!(0.98)),
        stock(account_id, "NVDA", "Technology", dec!(54), dec!(612.4), dec!(842.9), dec!(826.2), dec!(1.42)),
        stock(account_id, "JPM", "Financials", dec!(90), dec!(141.2), dec!(191.8), dec!(190.2), dec!(1.12)),
        stock(account_id, "XOM", "Energy", dec!(150), dec!(105.6), dec!(116.4), dec!(117.9), dec!(0.86)),
        stock(account_id, "UNH", "Healthcare", dec!(48), dec!(505.9), dec!(537.6), dec!(533.1), dec!(0.74)),
    ];
    holdings.push(NewHolding {
        account_id: account_id.to_string(),
        symbol: "AAPL240621C00190000".to_string(),
        asset_type: AssetType::Option,
        sector: Some("Technology".to_string()),
        qty: dec!(2),
        avg_cost: dec!(7.6),
        last: dec!(9.2),
        prev_close: dec!(8.7),
        beta: dec!(1.35),
        multiplier: Some(dec!(100)),
        option: Some(OptionTerms {
            underlying: "AAPL".to_string(),
            option_type: OptionType::Call,
            strike: dec!(190),
            expiry: date(2026, 6, 21),
        }),
    });
    holdings
}

fn cash_activity(account_id: &str, on: NaiveDate, activity_type: ActivityType, amount: Decimal) -> Activity {
    Activity {
        id: Uuid::new_v4().to_string(),
        account_id: account_id.to_string(),
        date: on,
        activity_type,
        asset_type: AssetType::Cash,
        symbol: "-".to_string(),
        qty: dec!(0),
        price: dec!(0),
        fees: dec!(0),
        multiplier: dec!(1),
        amount,
        option: None,
        created_at: Utc::now(),
    }
}

fn sample_activities(account_id: &str) -> Vec<Activity> {
    vec![
        Activity {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            date: date(2026, 2, 17),
            activity_type: ActivityType::Buy,
            asset_type: AssetType::Stock,
            symbol: "UNH".to_string(),
            qty: dec!(24),
            price: dec!(537.6),
            fees: dec!(0),
            multiplier: dec!(1),
            amount: dec!(-12902.4),
            option: None,
            created_at: Utc::now(),
        },
        Activity {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            date: date(2026, 2, 16),
            activity_type: ActivityType::Dividend,
            asset_type: AssetType::Stock,
            symbol: "XOM".to_string(),
            qty: dec!(0),
            price: dec!(0),
            fees: dec!(0),
            multiplier: dec!(1),
            amount: dec!(141.75),
            option: None,
            created_at: Utc::now(),
        },
        Activity {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            date: date(2026, 2, 14),
            activity_type: ActivityType::Sell,
            asset_type: AssetType::Stock,
            symbol: "MSFT".to_string(),
            qty: dec!(20),
            price: dec!(411.1),
            fees: dec!(0),
            multiplier: dec!(1),
            amount: dec!(8222.0),
            option: None,
            created_at: Utc::now(),
        },
        cash_activity(account_id, date(2026, 2, 11), ActivityType::Fee, dec!(-18.0)),
        cash_activity(account_id, date(2026, 2, 9), ActivityType::Deposit, dec!(6000.0)),
        Activity {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            date: date(2026, 2, 6),
            activity_type: ActivityType::Dividend,
            asset_type: AssetType::Stock,
            symbol: "JPM".to_string(),
            qty: dec!(0),
            price: dec!(0),
            fees: dec!(0),
            multiplier: dec!(1),
            amount: dec!(94.5),
            option: None,
            created_at: Utc::now(),
        },
        Activity {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            date: date(2026, 2, 2),
            activity_type: ActivityType::Buy,
            asset_type: AssetType::Option,
            symbol: "AAPL240621C00190000".to_string(),
            qty: dec!(2),
            price: dec!(7.6),
            fees: dec!(1.25),
            multiplier: dec!(100),
            amount: dec!(-1521.25),
            option: Some(OptionTerms {
                underlying: "AAPL".to_string(),
                option_type: OptionType::Call,
                strike: dec!(190),
                expiry: date(2026, 6, 21),
            }),
            created_at: Utc::now(),
        },
        cash_activity(account_id, date(2026, 1, 23), ActivityType::Withdrawal, dec!(-1000.0)),
    ]
}

/// Three closed lots for realized P&L attribution.
pub fn sample_tax_lots() -> Vec<TaxLot> {
    vec![
        TaxLot {
            lot_id: "L-1007".to_string(),
            symbol: "AAPL".to_string(),
            open_date: date(2025, 3, 2),
            close_date: date(2025, 12, 14),
            qty: dec!(45),
            buy_price: dec!(171.8),
            sell_price: dec!(188.6),
            buy_fees: dec!(3.2),
            sell_fees: dec!(3.5),
            basis_method: BasisMethod::Fifo,
            wash_sale_adj: dec!(0),
        },
        TaxLot {
            lot_id: "L-1013".to_string(),
            symbol: "MSFT".to_string(),
            open_date: date(2025, 4, 11),
            close_date: date(2025, 10, 7),
            qty: dec!(20),
            buy_price: dec!(389.4),
            sell_price: dec!(411.1),
            buy_fees: dec!(2.8),
            sell_fees: dec!(2.9),
            basis_method: BasisMethod::Fifo,
            wash_sale_adj: dec!(0),
        },
        TaxLot {
            lot_id: "L-1019".to_string(),
            symbol: "JPM".to_string(),
            open_date: date(2025, 1, 28),
            close_date: date(2025, 9, 23),
            qty: dec!(30),
            buy_price: dec!(172.1),
            sell_price: dec!(186.4),
            buy_fees: dec!(1.9),
            sell_fees: dec!(1.9),
            basis_method: BasisMethod::SpecificId,
            wash_sale_adj: dec!(-12.2),
        },
    ]
}
