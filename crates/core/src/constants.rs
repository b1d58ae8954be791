//! Engine-wide constants.

use chrono::NaiveDate;

/// Trading days used to annualize daily statistics.
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Floor applied to statistical denominators to avoid division by zero.
pub const EPSILON: f64 = 1e-9;

/// Number of rows in the recent-activity list of a view snapshot.
pub const RECENT_ACTIVITY_LIMIT: usize = 8;

/// Length of the synthetic daily return series generated per session.
pub const SERIES_LENGTH: usize = 120;

/// Default annual risk-free rate used for Sharpe calculations.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.04;

/// Starting value the synthetic equity curve compounds from.
pub const EQUITY_CURVE_START: f64 = 138_000.0;

/// Supported benchmark identifiers.
pub const BENCHMARK_SPY: &str = "SPY";
pub const BENCHMARK_QQQ: &str = "QQQ";

/// Benchmark series parameters: (daily drift, daily sigma, generator seed).
pub const SPY_PARAMS: (f64, f64, u32) = (0.00035, 0.009, 44);
pub const QQQ_PARAMS: (f64, f64, u32) = (0.00045, 0.011, 63);

/// Portfolio series parameters layered on top of the SPY base series.
pub const PORTFOLIO_ALPHA: f64 = 0.00018;
pub const PORTFOLIO_NOISE: f64 = 0.004;
pub const PORTFOLIO_SEED: u32 = 101;

/// First calendar date of the synthetic equity curve.
pub fn curve_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 22).expect("valid anchor date")
}
