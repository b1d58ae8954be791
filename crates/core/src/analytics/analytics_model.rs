//! View snapshot models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::series::CurvePoint;
use crate::activities::ActivityDetails;
use crate::holdings::Holding;
use crate::lots::TaxLot;

/// A holding enriched with its valuation figures for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRow {
    #[serde(flatten)]
    pub holding: Holding,
    pub market_value: Decimal,
    pub cost_basis: Decimal,
    pub unrealized: Decimal,
    pub day_pnl: Decimal,
    pub move_pct: Decimal,
    /// Share of total equity; zero when equity is zero.
    pub weight: Decimal,
}

/// Risk metrics over the lookback window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    /// Annualized standard deviation of daily returns.
    pub volatility: f64,
    pub sharpe: f64,
    /// Regression beta of portfolio returns against the benchmark.
    pub beta: f64,
    /// One-day 95% value at risk, as a positive currency loss.
    pub var95: Decimal,
    /// Most negative drawdown of the lookback equity curve.
    pub max_drawdown: f64,
}

/// Concentration figures over current weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationMetrics {
    pub top_position_weight: Decimal,
    pub top_sector_weight: Decimal,
    /// Herfindahl-Hirschman index: sum of squared weights.
    pub hhi: Decimal,
    pub sector_weights: BTreeMap<String, Decimal>,
}

/// Immutable analytics snapshot for one (scope, lookback, benchmark)
/// request. Recomputed on every refresh, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub as_of: NaiveDate,
    pub holdings: Vec<HoldingRow>,
    pub lots: Vec<TaxLot>,
    /// Most recent activity, descending by date, truncated.
    pub transactions: Vec<ActivityDetails>,
    pub equity: Decimal,
    pub market_value: Decimal,
    pub cash: Decimal,
    pub day_pnl: Decimal,
    pub unrealized: Decimal,
    pub realized: Decimal,
    pub dividend_income: Decimal,
    pub net_deposits: Decimal,
    pub risk: RiskMetrics,
    pub concentration: ConcentrationMetrics,
    /// Holdings ordered by day P&L, best first.
    pub contributors: Vec<HoldingRow>,
    /// Lookback window of the portfolio equity curve.
    pub curve: Vec<CurvePoint>,
    /// Benchmark returns compounded from the window's starting equity.
    pub benchmark_curve: Vec<CurvePoint>,
    pub benchmark: String,
}

/// Everything the view builder needs for one snapshot.
#[derive(Debug, Clone)]
pub struct ViewInput<'a> {
    pub holdings: &'a [Holding],
    pub transactions: &'a [ActivityDetails],
    pub tax_lots: &'a [TaxLot],
    pub portfolio_returns: &'a [f64],
    pub benchmark_returns: &'a [f64],
    pub equity_curve: &'a [CurvePoint],
    pub cash: Decimal,
    pub risk_free_rate: f64,
    pub lookback: usize,
    pub benchmark: String,
}
