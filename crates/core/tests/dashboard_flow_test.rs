//! End-to-end flow: seed the store, import a brokerage CSV, reconcile
//! holdings, and build dashboard snapshots for both scopes.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use pulserisk_core::accounts::AccountService;
use pulserisk_core::activities::{ActivityService, ImportMode};
use pulserisk_core::analytics::{DashboardService, SyntheticMarket};
use pulserisk_core::holdings::HoldingRepositoryTrait;
use pulserisk_core::ledger::LedgerService;
use pulserisk_core::scope::ScopeService;
use pulserisk_core::store::{sample_tax_lots, seed_demo_data, MemoryStore};
use pulserisk_core::ViewScope;

struct Engine {
    store: Arc<MemoryStore>,
    accounts: AccountService,
    activities: ActivityService,
    dashboard: DashboardService,
}

async fn engine() -> Engine {
    let store = Arc::new(MemoryStore::new());
    seed_demo_data(&store).await.unwrap();

    let accounts = AccountService::new(store.clone(), store.clone(), store.clone());
    let ledger = LedgerService::new(store.clone());
    let activities = ActivityService::new(store.clone(), ledger);
    let scope = ScopeService::new(store.clone(), store.clone(), store.clone());
    let dashboard = DashboardService::new(scope, SyntheticMarket::with_defaults(), sample_tax_lots());

    Engine {
        store,
        accounts,
        activities,
        dashboard,
    }
}

fn brokerage_id(engine: &Engine) -> String {
    engine
        .accounts
        .list_accounts()
        .unwrap()
        .into_iter()
        .find(|account| account.name == "Schwab Brokerage")
        .unwrap()
        .id
}

#[tokio::test]
async fn test_import_reconciles_holdings() {
    let engine = engine().await;
    let account_id = brokerage_id(&engine);

    let csv = "\"Date\",\"Action\",\"Symbol\",\"Description\",\"Quantity\",\"Price\",\"Fees & Comm\",\"Amount\"\n\
        \"02/18/2026\",\"Buy\",\"AAPL\",\"AAPL Apple Inc\",\"10\",\"200.00\",\"1.00\",\"\"\n\
        \"02/19/2026\",\"Sell\",\"NVDA\",\"NVDA NVIDIA Corp\",\"54\",\"900.00\",\"0.50\",\"\"";

    let summary = engine
        .activities
        .import_activities(&account_id, csv, ImportMode::Lenient)
        .await
        .unwrap();
    assert_eq!(summary.imported, 2);
    assert!(summary.warnings.is_empty());

    let holdings = engine.store.list(Some(account_id.as_str())).unwrap();
    // NVDA was fully sold and deleted: 7 seeded positions become 6.
    assert_eq!(holdings.len(), 6);
    assert!(!holdings.iter().any(|holding| holding.symbol == "NVDA"));

    let aapl = holdings
        .iter()
        .find(|holding| holding.symbol == "AAPL")
        .unwrap();
    assert_eq!(aapl.qty, dec!(130));
    let expected_avg = (dec!(120) * dec!(148.3) + dec!(10) * dec!(200)) / dec!(130);
    assert_eq!(aapl.avg_cost, expected_avg);
    assert_eq!(aapl.last, dec!(200));
    assert_eq!(aapl.prev_close, dec!(198.2));
}

#[tokio::test]
async fn test_single_scope_snapshot() {
    let engine = engine().await;
    let account_id = brokerage_id(&engine);

    let view = engine
        .dashboard
        .refresh(&ViewScope::Single(account_id.clone()), 60, "SPY")
        .unwrap();

    assert_eq!(view.holdings.len(), 7);
    assert_eq!(view.benchmark, "SPY");

    // Cash is the signed sum of the seeded transaction amounts.
    let expected_cash = dec!(-12902.4)
        + dec!(141.75)
        + dec!(8222.0)
        + dec!(-18.0)
        + dec!(6000.0)
        + dec!(94.5)
        + dec!(-1521.25)
        + dec!(-1000.0);
    assert_eq!(view.cash, expected_cash);

    let market_value: Decimal = view.holdings.iter().map(|row| row.market_value).sum();
    assert_eq!(view.equity, market_value + expected_cash);

    // Weights are shares of total equity, so they sum to the invested part.
    let total_weight: Decimal = view.holdings.iter().map(|row| row.weight).sum();
    assert!((total_weight - market_value / view.equity).abs() < dec!(0.0000001));

    assert_eq!(view.transactions.len(), 8);
    assert!(view.transactions[0].activity.date >= view.transactions[7].activity.date);
    assert_eq!(view.curve.len(), 61);
    assert_eq!(view.benchmark_curve.len(), 60);
    assert!(view.risk.volatility.is_finite());
    assert!(view.risk.sharpe.is_finite());
    assert!(view.risk.beta.is_finite());
    assert!(view.risk.max_drawdown <= 0.0);
    assert_eq!(view.lots.len(), 3);
}

#[tokio::test]
async fn test_combined_scope_annotates_account_names() {
    let engine = engine().await;

    let view = engine
        .dashboard
        .refresh(&ViewScope::Combined, 30, "QQQ")
        .unwrap();

    assert_eq!(view.holdings.len(), 7);
    assert!(view
        .transactions
        .iter()
        .all(|tx| tx.account_name == "Schwab Brokerage"));
    assert_eq!(view.curve.len(), 31);
}

#[tokio::test]
async fn test_unknown_benchmark_is_rejected() {
    let engine = engine().await;
    let account_id = brokerage_id(&engine);

    let result = engine
        .dashboard
        .refresh(&ViewScope::Single(account_id), 60, "DAX");
    assert!(result.is_err());
}

#[tokio::test]
async fn test_sell_without_holding_imports_with_warning() {
    let engine = engine().await;
    let account_id = brokerage_id(&engine);

    let csv = "Date,Action,Symbol,Quantity,Price\n02/18/2026,Sell,ZZZ,5,10.00";
    let summary = engine
        .activities
        .import_activities(&account_id, csv, ImportMode::Lenient)
        .await
        .unwrap();

    // The ledger row is recorded; only the holding sync is skipped.
    assert_eq!(summary.imported, 1);
    assert!(summary
        .warnings
        .iter()
        .any(|warning| warning.message.contains("ZZZ")));
}

#[tokio::test]
async fn test_strict_mode_rejects_defaulted_cells() {
    let engine = engine().await;
    let account_id = brokerage_id(&engine);

    let csv = "Date,Action,Symbol,Quantity,Price\n02/18/2026,Journal,AAPL,abc,10.00";
    let result = engine
        .activities
        .import_activities(&account_id, csv, ImportMode::Strict)
        .await;
    assert!(result.is_err());

    // Strict failures leave the ledger untouched.
    let view = engine
        .dashboard
        .refresh(&ViewScope::Single(account_id), 60, "SPY")
        .unwrap();
    assert_eq!(view.transactions.len(), 8);
}

#[tokio::test]
async fn test_buy_sell_round_trip_in_one_file() {
    let engine = engine().await;
    let account_id = brokerage_id(&engine);

    // The SELL must see the holding the BUY two rows earlier created.
    let csv = "Date,Action,Symbol,Quantity,Price\n\
        02/18/2026,Buy,TSLA,10,250.00\n\
        02/19/2026,Buy,TSLA,10,260.00\n\
        02/20/2026,Sell,TSLA,20,270.00";
    let summary = engine
        .activities
        .import_activities(&account_id, csv, ImportMode::Lenient)
        .await
        .unwrap();

    assert_eq!(summary.imported, 3);
    assert!(summary.warnings.is_empty());

    let holdings = engine.store.list(Some(account_id.as_str())).unwrap();
    assert!(!holdings.iter().any(|holding| holding.symbol == "TSLA"));
}
