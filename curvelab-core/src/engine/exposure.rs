//! Exposure and turnover diagnostics over the weights actually used.
//!
//! Row sums skip NaN terms, matching the engine's row-sum convention
//! elsewhere (an all-NaN row sums to 0).

use crate::domain::{TimeMatrix, TimeSeries};

/// Gross exposure: Σ|w| per date.
pub fn gross_exposure(weights_used: &TimeMatrix) -> TimeSeries {
    row_sums(weights_used, f64::abs)
}

/// Net exposure: Σw per date.
pub fn net_exposure(weights_used: &TimeMatrix) -> TimeSeries {
    row_sums(weights_used, |v| v)
}

/// Turnover: 0.5 · Σ|w[t] − w[t−1]| per date.
///
/// Index 0 is pinned to exactly 0.0 — there is no prior state to
/// compare against, and the value is a policy choice, not NaN.
pub fn turnover(weights_used: &TimeMatrix) -> TimeSeries {
    let n = weights_used.n_rows();
    let mut values = vec![0.0; n];
    for t in 1..n {
        let total: f64 = (0..weights_used.n_assets())
            .map(|a| weights_used.value(t, a) - weights_used.value(t - 1, a))
            .filter(|v| !v.is_nan())
            .map(f64::abs)
            .sum();
        values[t] = 0.5 * total;
    }
    TimeSeries::from_parts_unchecked(weights_used.dates().to_vec(), values)
}

fn row_sums(m: &TimeMatrix, f: impl Fn(f64) -> f64) -> TimeSeries {
    let values = (0..m.n_rows())
        .map(|t| m.row(t).filter(|v| !v.is_nan()).map(&f).sum())
        .collect();
    TimeSeries::from_parts_unchecked(m.dates().to_vec(), values)
}
