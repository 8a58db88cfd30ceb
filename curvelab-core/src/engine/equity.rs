//! Portfolio return aggregation and equity compounding.

use crate::domain::{TimeMatrix, TimeSeries};

/// Per-date portfolio return: Σ_assets (w_used · asset_return).
///
/// NaN products are skipped, so an all-NaN row contributes 0.0 — under
/// `fill` the lag-blanked start of the series earns nothing rather
/// than poisoning the curve. Under `drop` rows are pre-masked and
/// under `raise` NaNs have already failed the run, so the skip only
/// ever fires on that start-of-series case.
pub fn portfolio_returns(weights_used: &TimeMatrix, asset_returns: &TimeMatrix) -> TimeSeries {
    debug_assert_eq!(weights_used.n_assets(), asset_returns.n_assets());
    debug_assert_eq!(weights_used.n_rows(), asset_returns.n_rows());

    let values = (0..weights_used.n_rows())
        .map(|t| {
            (0..weights_used.n_assets())
                .map(|a| weights_used.value(t, a) * asset_returns.value(t, a))
                .filter(|v| !v.is_nan())
                .sum()
        })
        .collect();
    TimeSeries::from_parts_unchecked(weights_used.dates().to_vec(), values)
}

/// Compound returns into an equity curve:
/// `equity[t] = initial_equity · Π_{s≤t} (1 + r[s])`.
///
/// Strictly left-to-right — the product is order-dependent and the
/// dates are already in increasing order by pipeline invariant.
pub fn compound(returns: &TimeSeries, initial_equity: f64) -> TimeSeries {
    let mut acc = initial_equity;
    let values = returns
        .values()
        .iter()
        .map(|r| {
            acc *= 1.0 + r;
            acc
        })
        .collect();
    TimeSeries::from_parts_unchecked(returns.dates().to_vec(), values)
}
