//! Deterministic synthetic market series.
//!
//! No persisted price history exists, so each session generates its own:
//! a seeded 32-bit linear-congruential generator feeds a Box-Muller
//! transform, and the resulting Gaussian draws shape benchmark and
//! portfolio return series. The same seed always reproduces the same
//! series bit for bit; analytics depend on that.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{
    curve_anchor, BENCHMARK_QQQ, BENCHMARK_SPY, DEFAULT_RISK_FREE_RATE, EQUITY_CURVE_START,
    PORTFOLIO_ALPHA, PORTFOLIO_NOISE, PORTFOLIO_SEED, QQQ_PARAMS, SERIES_LENGTH, SPY_PARAMS,
};

/// Seeded 32-bit linear-congruential generator.
#[derive(Debug, Clone)]
pub struct SeriesRng {
    state: u32,
}

impl SeriesRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next draw in [0, 1).
    pub fn next_uniform(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state as f64 / u32::MAX as f64
    }

    /// Standard-normal variate via the Box-Muller transform.
    ///
    /// The first draw is clamped away from zero so ln never sees 0.
    pub fn next_normal(&mut self) -> f64 {
        let u1 = self.next_uniform().max(1e-9);
        let u2 = self.next_uniform();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

/// A benchmark return series: drift plus a slow sinusoidal regime plus
/// Gaussian noise.
pub fn return_series(length: usize, drift: f64, sigma: f64, seed: u32) -> Vec<f64> {
    let mut rng = SeriesRng::new(seed);
    (0..length)
        .map(|index| {
            let wave = (index as f64 / 9.0).sin() * 0.0012;
            drift + wave + rng.next_normal() * sigma
        })
        .collect()
}

/// A portfolio return series derived from a benchmark base.
///
/// Tracks the base at 0.72 exposure plus alpha and noise, with a periodic
/// drawdown regime: every 24 days, the first 8 lose 7bps each.
pub fn portfolio_returns(base: &[f64], alpha: f64, noise: f64, seed: u32) -> Vec<f64> {
    let mut rng = SeriesRng::new(seed);
    base.iter()
        .enumerate()
        .map(|(index, base_return)| {
            let regime = if index % 24 < 8 { -0.0007 } else { 0.0 };
            base_return * 0.72 + alpha + regime + rng.next_normal() * noise
        })
        .collect()
}

/// One point of an equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Compounds a return series into an equity curve.
///
/// Each element advances one calendar day from the anchor, weekends
/// included, and records the value after applying that day's return.
pub fn to_curve(returns: &[f64], starting_value: f64, anchor: NaiveDate) -> Vec<CurvePoint> {
    let mut value = starting_value;
    let mut date = anchor;

    returns
        .iter()
        .map(|ret| {
            value *= 1.0 + ret;
            let point = CurvePoint { date, value };
            date = date + Duration::days(1);
            point
        })
        .collect()
}

/// The synthetic market a session computes analytics against.
#[derive(Debug, Clone)]
pub struct SyntheticMarket {
    benchmark_series: BTreeMap<String, Vec<f64>>,
    pub portfolio_returns: Vec<f64>,
    pub equity_curve: Vec<CurvePoint>,
    pub risk_free_rate: f64,
}

impl SyntheticMarket {
    /// Builds the default session market: SPY and QQQ benchmarks, a
    /// portfolio series tracking the SPY base, and the equity curve
    /// compounded from the standard starting value.
    pub fn with_defaults() -> Self {
        let (spy_drift, spy_sigma, spy_seed) = SPY_PARAMS;
        let (qqq_drift, qqq_sigma, qqq_seed) = QQQ_PARAMS;

        let spy = return_series(SERIES_LENGTH, spy_drift, spy_sigma, spy_seed);
        let qqq = return_series(SERIES_LENGTH, qqq_drift, qqq_sigma, qqq_seed);
        let portfolio = portfolio_returns(&spy, PORTFOLIO_ALPHA, PORTFOLIO_NOISE, PORTFOLIO_SEED);
        let equity_curve = to_curve(&portfolio, EQUITY_CURVE_START, curve_anchor());

        let mut benchmark_series = BTreeMap::new();
        benchmark_series.insert(BENCHMARK_SPY.to_string(), spy);
        benchmark_series.insert(BENCHMARK_QQQ.to_string(), qqq);

        Self {
            benchmark_series,
            portfolio_returns: portfolio,
            equity_curve,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }

    /// The return series for a benchmark id, if known.
    pub fn benchmark(&self, benchmark: &str) -> Option<&[f64]> {
        self.benchmark_series
            .get(benchmark)
            .map(|series| series.as_slice())
    }

    /// Known benchmark ids, in stable order.
    pub fn benchmark_ids(&self) -> Vec<&str> {
        self.benchmark_series.keys().map(String::as_str).collect()
    }
}
