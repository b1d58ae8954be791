//! Numeric primitives for return-series statistics.
//!
//! Variance, standard deviation, and covariance use sample (N-1)
//! denominators, floored at 1 so a single-sample series divides by one
//! instead of zero. Quantiles interpolate linearly between order
//! statistics.

/// Arithmetic mean. Zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance with the N-1 denominator floored at 1.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let sum_squared_diff: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    sum_squared_diff / (values.len() - 1).max(1) as f64
}

/// Sample standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Sample covariance of two equally-indexed series, N-1 floored at 1.
pub fn covariance(first: &[f64], second: &[f64]) -> f64 {
    if first.is_empty() || second.is_empty() {
        return 0.0;
    }
    let first_mean = mean(first);
    let second_mean = mean(second);
    let sum: f64 = first
        .iter()
        .zip(second.iter())
        .map(|(a, b)| (a - first_mean) * (b - second_mean))
        .sum();
    sum / (first.len() - 1).max(1) as f64
}

/// Quantile by linear interpolation between order statistics.
///
/// `percentile` is a fraction in [0, 1]. Zero for an empty slice.
pub fn quantile(values: &[f64], percentile: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let index = (sorted.len() - 1) as f64 * percentile;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = index - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Most negative peak-to-trough decline of a value series.
///
/// Returns 0 for an empty or monotonically non-decreasing series.
pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = match values.first() {
        Some(first) => *first,
        None => return 0.0,
    };
    let mut max_drawdown = 0.0f64;

    for &value in values {
        peak = peak.max(value);
        if peak != 0.0 {
            let drawdown = (value - peak) / peak;
            max_drawdown = max_drawdown.min(drawdown);
        }
    }

    max_drawdown
}
