//! View-state builder and dashboard orchestration.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use super::analytics_model::{
    ConcentrationMetrics, HoldingRow, RiskMetrics, ViewInput, ViewState,
};
use super::series::{to_curve, SyntheticMarket};
use super::stats;
use crate::activities::ActivityDetails;
use crate::activities::ActivityType;
use crate::constants::{curve_anchor, EPSILON, RECENT_ACTIVITY_LIMIT, TRADING_DAYS_PER_YEAR};
use crate::errors::{Result, ValidationError};
use crate::holdings::AssetType;
use crate::lots::TaxLot;
use crate::scope::{ScopeService, ViewScope};
use crate::Error;

/// Builds the immutable analytics snapshot for one request.
///
/// Pure over its inputs; every denominator is guarded so empty scopes and
/// constant series produce zeros instead of NaN.
pub fn build_view_state(input: ViewInput<'_>) -> ViewState {
    let rows: Vec<HoldingRow> = input.holdings.iter().map(holding_row).collect();

    let market_value: Decimal = rows.iter().map(|row| row.market_value).sum();
    let day_pnl: Decimal = rows.iter().map(|row| row.day_pnl).sum();
    let unrealized: Decimal = rows.iter().map(|row| row.unrealized).sum();
    let equity = market_value + input.cash;

    let rows: Vec<HoldingRow> = rows
        .into_iter()
        .map(|mut row| {
            row.weight = if equity.is_zero() {
                Decimal::ZERO
            } else {
                row.market_value / equity
            };
            row
        })
        .collect();

    let lot_gains: Decimal = input.tax_lots.iter().map(TaxLot::realized_gain).sum();
    let realized = lot_gains + derive_realized_from_activity(input.transactions, &rows);

    let dividend_income: Decimal = input
        .transactions
        .iter()
        .filter(|tx| tx.activity.activity_type == ActivityType::Dividend)
        .map(|tx| tx.activity.amount)
        .sum();

    let net_deposits: Decimal = input
        .transactions
        .iter()
        .filter(|tx| {
            matches!(
                tx.activity.activity_type,
                ActivityType::Deposit | ActivityType::Withdrawal
            )
        })
        .map(|tx| tx.activity.amount)
        .sum();

    let portfolio_window = tail(input.portfolio_returns, input.lookback);
    let benchmark_window = tail(input.benchmark_returns, input.lookback);
    let curve_window = tail(input.equity_curve, input.lookback + 1);

    let risk = risk_metrics(
        portfolio_window,
        benchmark_window,
        curve_window,
        equity,
        input.risk_free_rate,
    );
    let concentration = concentration_metrics(&rows);

    let mut contributors = rows.clone();
    contributors.sort_by(|a, b| b.day_pnl.cmp(&a.day_pnl));

    let mut transactions = input.transactions.to_vec();
    transactions.sort_by(|a, b| b.activity.date.cmp(&a.activity.date));
    transactions.truncate(RECENT_ACTIVITY_LIMIT);

    let benchmark_curve = match curve_window.first() {
        Some(first) => to_curve(benchmark_window, first.value, first.date),
        None => Vec::new(),
    };

    let as_of = curve_window
        .last()
        .map(|point| point.date)
        .unwrap_or_else(curve_anchor);

    ViewState {
        as_of,
        holdings: rows,
        lots: input.tax_lots.to_vec(),
        transactions,
        equity,
        market_value,
        cash: input.cash,
        day_pnl,
        unrealized,
        realized,
        dividend_income,
        net_deposits,
        risk,
        concentration,
        contributors,
        curve: curve_window.to_vec(),
        benchmark_curve,
        benchmark: input.benchmark,
    }
}

fn holding_row(holding: &crate::holdings::Holding) -> HoldingRow {
    let multiplier = if holding.multiplier.is_zero() {
        Decimal::ONE
    } else {
        holding.multiplier
    };
    let market_value = holding.qty * holding.last * multiplier;
    let cost_basis = holding.qty * holding.avg_cost * multiplier;
    let day_pnl = (holding.last - holding.prev_close) * holding.qty * multiplier;
    let move_pct = if holding.prev_close.is_zero() {
        Decimal::ZERO
    } else {
        holding.last / holding.prev_close - Decimal::ONE
    };

    HoldingRow {
        holding: holding.clone(),
        market_value,
        cost_basis,
        unrealized: market_value - cost_basis,
        day_pnl,
        move_pct,
        weight: Decimal::ZERO,
    }
}

/// Realized P&L carried by the ledger itself: disposals matched to a
/// currently-held position are booked at that position's average cost.
/// Disposals with no current holding contribute nothing.
fn derive_realized_from_activity(
    transactions: &[ActivityDetails],
    rows: &[HoldingRow],
) -> Decimal {
    let by_key: HashMap<(&str, AssetType), &HoldingRow> = rows
        .iter()
        .map(|row| {
            (
                (row.holding.symbol.as_str(), row.holding.asset_type),
                row,
            )
        })
        .collect();

    transactions
        .iter()
        .filter(|tx| tx.activity.activity_type.is_disposal())
        .fold(Decimal::ZERO, |sum, tx| {
            let activity = &tx.activity;
            let row = match by_key.get(&(activity.symbol.as_str(), activity.asset_type)) {
                Some(row) if !activity.qty.is_zero() => row,
                _ => return sum,
            };

            let multiplier = if !activity.multiplier.is_zero() {
                activity.multiplier
            } else if !row.holding.multiplier.is_zero() {
                row.holding.multiplier
            } else {
                Decimal::ONE
            };
            let proceeds = activity.qty * activity.price * multiplier - activity.fees;
            let basis = activity.qty * row.holding.avg_cost * multiplier;
            sum + (proceeds - basis)
        })
}

fn risk_metrics(
    portfolio_window: &[f64],
    benchmark_window: &[f64],
    curve_window: &[super::series::CurvePoint],
    equity: Decimal,
    risk_free_rate: f64,
) -> RiskMetrics {
    let annualization = (TRADING_DAYS_PER_YEAR as f64).sqrt();

    let volatility = stats::std_dev(portfolio_window) * annualization;

    let daily_risk_free = risk_free_rate / TRADING_DAYS_PER_YEAR as f64;
    let excess: Vec<f64> = portfolio_window
        .iter()
        .map(|ret| ret - daily_risk_free)
        .collect();
    let excess_std_dev = floored(stats::std_dev(&excess));
    let sharpe = stats::mean(&excess) / excess_std_dev * annualization;

    let beta = stats::covariance(portfolio_window, benchmark_window)
        / floored(stats::variance(benchmark_window));

    let equity_f64 = equity.to_f64().unwrap_or(0.0);
    let var95_f64 = -stats::quantile(portfolio_window, 0.05) * equity_f64;
    let var95 = Decimal::from_f64_retain(var95_f64)
        .unwrap_or(Decimal::ZERO)
        .round_dp(2);

    let curve_values: Vec<f64> = curve_window.iter().map(|point| point.value).collect();
    let max_drawdown = stats::max_drawdown(&curve_values);

    RiskMetrics {
        volatility,
        sharpe,
        beta,
        var95,
        max_drawdown,
    }
}

fn concentration_metrics(rows: &[HoldingRow]) -> ConcentrationMetrics {
    let mut sector_weights: BTreeMap<String, Decimal> = BTreeMap::new();
    for row in rows {
        *sector_weights
            .entry(row.holding.sector.clone())
            .or_insert(Decimal::ZERO) += row.weight;
    }

    let top_position_weight = rows
        .iter()
        .map(|row| row.weight)
        .max()
        .unwrap_or(Decimal::ZERO);
    let top_sector_weight = sector_weights
        .values()
        .copied()
        .max()
        .unwrap_or(Decimal::ZERO);
    let hhi = rows
        .iter()
        .fold(Decimal::ZERO, |sum, row| sum + row.weight * row.weight);

    ConcentrationMetrics {
        top_position_weight,
        top_sector_weight,
        hhi,
        sector_weights,
    }
}

/// The trailing `count` elements of a slice.
fn tail<T>(values: &[T], count: usize) -> &[T] {
    let take = count.min(values.len());
    &values[values.len() - take..]
}

fn floored(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        EPSILON
    }
}

/// Orchestrates one dashboard refresh: scope selection, cash derivation,
/// and view-state construction.
pub struct DashboardService {
    scope_service: ScopeService,
    market: SyntheticMarket,
    tax_lots: Vec<TaxLot>,
}

impl DashboardService {
    /// Creates a new DashboardService instance.
    pub fn new(scope_service: ScopeService, market: SyntheticMarket, tax_lots: Vec<TaxLot>) -> Self {
        Self {
            scope_service,
            market,
            tax_lots,
        }
    }

    /// The session's synthetic market.
    pub fn market(&self) -> &SyntheticMarket {
        &self.market
    }

    /// Builds the view snapshot for one (scope, lookback, benchmark)
    /// request. Cash is the signed sum of every scoped transaction amount.
    pub fn refresh(
        &self,
        scope: &ViewScope,
        lookback: usize,
        benchmark: &str,
    ) -> Result<ViewState> {
        let scope_data = self.scope_service.load(scope)?;
        let cash: Decimal = scope_data
            .transactions
            .iter()
            .map(|tx| tx.activity.amount)
            .sum();

        let benchmark_returns = self.market.benchmark(benchmark).ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown benchmark: {}",
                benchmark
            )))
        })?;

        Ok(build_view_state(ViewInput {
            holdings: &scope_data.holdings,
            transactions: &scope_data.transactions,
            tax_lots: &self.tax_lots,
            portfolio_returns: &self.market.portfolio_returns,
            benchmark_returns,
            equity_curve: &self.market.equity_curve,
            cash,
            risk_free_rate: self.market.risk_free_rate,
            lookback,
            benchmark: benchmark.to_string(),
        }))
    }
}
