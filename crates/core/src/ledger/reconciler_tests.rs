use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::reconciler::*;
use crate::activities::{Activity, ActivityType};
use crate::holdings::{AssetType, Holding};

fn holding(qty: Decimal, avg_cost: Decimal, last: Decimal) -> Holding {
    Holding {
        id: "h-1".to_string(),
        account_id: "acct-1".to_string(),
        symbol: "AAPL".to_string(),
        asset_type: AssetType::Stock,
        sector: "Technology".to_string(),
        qty,
        avg_cost,
        last,
        prev_close: last,
        beta: dec!(1.1),
        multiplier: dec!(1),
        option: None,
        updated_at: Utc::now(),
    }
}

fn trade(activity_type: ActivityType, qty: Decimal, price: Decimal) -> Activity {
    Activity {
        id: "a-1".to_string(),
        account_id: "acct-1".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 2, 17).unwrap(),
        activity_type,
        asset_type: AssetType::Stock,
        symbol: "AAPL".to_string(),
        qty,
        price,
        fees: dec!(0),
        multiplier: dec!(1),
        amount: dec!(0),
        option: None,
        created_at: Utc::now(),
    }
}

#[test]
fn test_buy_into_existing_holding_weights_cost_exactly() {
    let current = holding(dec!(10), dec!(100), dec!(105));
    let activity = trade(ActivityType::Buy, dec!(30), dec!(120));

    match plan(Some(&current), &activity) {
        ReconcilePlan::Update(updated) => {
            assert_eq!(updated.qty, dec!(40));
            // (10*100 + 30*120) / 40 = 115, exactly
            assert_eq!(updated.avg_cost, dec!(115));
            assert_eq!(updated.last, dec!(120));
            assert_eq!(updated.prev_close, dec!(105));
        }
        other => panic!("expected update, got {:?}", other),
    }
}

#[test]
fn test_sequential_buys_match_closed_form_average() {
    let q1 = dec!(12);
    let p1 = dec!(148.30);
    let q2 = dec!(8);
    let p2 = dec!(162.75);

    let current = holding(q1, p1, p1);
    let activity = trade(ActivityType::Buy, q2, p2);
    match plan(Some(&current), &activity) {
        ReconcilePlan::Update(updated) => {
            assert_eq!(updated.avg_cost, (q1 * p1 + q2 * p2) / (q1 + q2));
        }
        other => panic!("expected update, got {:?}", other),
    }
}

#[test]
fn test_first_buy_creates_holding_with_defaults() {
    let activity = trade(ActivityType::Buy, dec!(5), dec!(200));
    match plan(None, &activity) {
        ReconcilePlan::Insert(draft) => {
            assert_eq!(draft.qty, dec!(5));
            assert_eq!(draft.avg_cost, dec!(200));
            assert_eq!(draft.last, dec!(200));
            assert_eq!(draft.prev_close, dec!(200));
            assert_eq!(draft.beta, dec!(1));
            assert_eq!(draft.sector.as_deref(), Some("Unknown"));
        }
        other => panic!("expected insert, got {:?}", other),
    }
}

#[test]
fn test_partial_sell_keeps_average_cost() {
    let current = holding(dec!(40), dec!(115), dec!(120));
    let activity = trade(ActivityType::Sell, dec!(15), dec!(130));

    match plan(Some(&current), &activity) {
        ReconcilePlan::Update(updated) => {
            assert_eq!(updated.qty, dec!(25));
            assert_eq!(updated.avg_cost, dec!(115));
            assert_eq!(updated.last, dec!(130));
            assert_eq!(updated.prev_close, dec!(120));
        }
        other => panic!("expected update, got {:?}", other),
    }
}

#[test]
fn test_exact_sell_closes_position() {
    let current = holding(dec!(20), dec!(115), dec!(120));
    let activity = trade(ActivityType::Sell, dec!(20), dec!(130));

    match plan(Some(&current), &activity) {
        ReconcilePlan::Delete { holding_id } => assert_eq!(holding_id, "h-1"),
        other => panic!("expected delete, got {:?}", other),
    }
}

#[test]
fn test_over_sell_also_closes_position() {
    let current = holding(dec!(20), dec!(115), dec!(120));
    let activity = trade(ActivityType::Sell, dec!(35), dec!(130));

    assert!(matches!(
        plan(Some(&current), &activity),
        ReconcilePlan::Delete { .. }
    ));
}

#[test]
fn test_sell_without_holding_is_skipped() {
    let activity = trade(ActivityType::Sell, dec!(10), dec!(130));
    assert!(matches!(
        plan(None, &activity),
        ReconcilePlan::Skip(SkipReason::MissingHolding)
    ));
}

#[test]
fn test_non_trade_activities_never_touch_holdings() {
    let current = holding(dec!(10), dec!(100), dec!(105));
    for activity_type in [
        ActivityType::Dividend,
        ActivityType::Deposit,
        ActivityType::Withdrawal,
        ActivityType::Fee,
        ActivityType::Assignment,
        ActivityType::Expiry,
    ] {
        let activity = trade(activity_type, dec!(10), dec!(100));
        assert!(matches!(
            plan(Some(&current), &activity),
            ReconcilePlan::Skip(SkipReason::NotTrade)
        ));
    }
}

#[test]
fn test_buy_falls_back_to_trade_price_when_no_last() {
    let current = holding(dec!(10), dec!(100), dec!(0));
    let activity = trade(ActivityType::Buy, dec!(10), dec!(50));

    match plan(Some(&current), &activity) {
        ReconcilePlan::Update(updated) => {
            assert_eq!(updated.prev_close, dec!(50));
            assert_eq!(updated.last, dec!(50));
        }
        other => panic!("expected update, got {:?}", other),
    }
}
