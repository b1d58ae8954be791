use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::holdings_model::*;

fn stock_draft() -> NewHolding {
    NewHolding {
        account_id: "acct-1".to_string(),
        symbol: "aapl".to_string(),
        asset_type: AssetType::Stock,
        sector: Some("Technology".to_string()),
        qty: dec!(10),
        avg_cost: dec!(150),
        last: dec!(160),
        prev_close: dec!(158),
        beta: dec!(1.1),
        multiplier: None,
        option: None,
    }
}

fn call_terms() -> OptionTerms {
    OptionTerms {
        underlying: "AAPL".to_string(),
        option_type: OptionType::Call,
        strike: dec!(190),
        expiry: NaiveDate::from_ymd_opt(2026, 6, 21).unwrap(),
    }
}

#[test]
fn test_valid_stock_draft_passes() {
    assert!(stock_draft().validate().is_ok());
}

#[test]
fn test_symbol_is_normalized() {
    let draft = stock_draft();
    assert_eq!(draft.normalized_symbol(), "AAPL");
}

#[test]
fn test_zero_quantity_rejected() {
    let mut draft = stock_draft();
    draft.qty = dec!(0);
    assert!(draft.validate().is_err());
}

#[test]
fn test_negative_price_rejected() {
    let mut draft = stock_draft();
    draft.prev_close = dec!(-1);
    assert!(draft.validate().is_err());
}

#[test]
fn test_option_without_terms_rejected() {
    let mut draft = stock_draft();
    draft.asset_type = AssetType::Option;
    draft.option = None;
    assert!(draft.validate().is_err());
}

#[test]
fn test_option_with_zero_strike_rejected() {
    let mut draft = stock_draft();
    draft.asset_type = AssetType::Option;
    let mut terms = call_terms();
    terms.strike = dec!(0);
    draft.option = Some(terms);
    assert!(draft.validate().is_err());
}

#[test]
fn test_option_with_blank_underlying_rejected() {
    let mut draft = stock_draft();
    draft.asset_type = AssetType::Option;
    let mut terms = call_terms();
    terms.underlying = "  ".to_string();
    draft.option = Some(terms);
    assert!(draft.validate().is_err());
}

#[test]
fn test_multiplier_floors_at_one_for_options() {
    let mut draft = stock_draft();
    draft.asset_type = AssetType::Option;
    draft.option = Some(call_terms());
    draft.multiplier = Some(dec!(0));
    assert_eq!(draft.effective_multiplier(), dec!(1));

    draft.multiplier = Some(dec!(100));
    assert_eq!(draft.effective_multiplier(), dec!(100));
}

#[test]
fn test_multiplier_pinned_to_one_for_stock() {
    let mut draft = stock_draft();
    draft.multiplier = Some(dec!(100));
    assert_eq!(draft.effective_multiplier(), dec!(1));
}

#[test]
fn test_sector_defaults_to_other() {
    let mut draft = stock_draft();
    draft.sector = None;
    assert_eq!(draft.sector_or_default(), "Other");
    draft.sector = Some("  ".to_string());
    assert_eq!(draft.sector_or_default(), "Other");
}
