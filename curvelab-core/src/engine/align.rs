//! Column and index alignment of the price/weight pair.
//!
//! Both tables are reduced to their common assets and common dates.
//! Column order follows the price matrix; both inputs are already
//! date-sorted by the validator, so the date intersection stays sorted.

use super::error::InputError;
use crate::domain::TimeMatrix;
use std::collections::BTreeSet;

/// Restrict `prices` and `weights` to their shared assets and dates.
///
/// Fails if no asset is shared, or fewer than 2 dates are shared (a
/// single date cannot yield a return).
pub fn align(
    prices: &TimeMatrix,
    weights: &TimeMatrix,
) -> Result<(TimeMatrix, TimeMatrix), InputError> {
    // Asset intersection, in price-column order.
    let mut px_cols = Vec::new();
    let mut w_cols = Vec::new();
    for (i, asset) in prices.assets().iter().enumerate() {
        if let Some(j) = weights.asset_position(asset) {
            px_cols.push(i);
            w_cols.push(j);
        }
    }
    if px_cols.is_empty() {
        return Err(InputError::NoCommonAssets);
    }

    // Date intersection; inputs are sorted, so the BTreeSet ordering
    // matches index order.
    let px_dates: BTreeSet<_> = prices.dates().iter().copied().collect();
    let w_dates: BTreeSet<_> = weights.dates().iter().copied().collect();
    let common: BTreeSet<_> = px_dates.intersection(&w_dates).copied().collect();
    if common.len() < 2 {
        return Err(InputError::TooFewCommonDates(common.len()));
    }

    let px_rows: Vec<usize> = prices
        .dates()
        .iter()
        .enumerate()
        .filter(|(_, date)| common.contains(date))
        .map(|(i, _)| i)
        .collect();
    let w_rows: Vec<usize> = weights
        .dates()
        .iter()
        .enumerate()
        .filter(|(_, date)| common.contains(date))
        .map(|(i, _)| i)
        .collect();

    let px = prices.select_assets(&px_cols).select_rows(&px_rows);
    let w = weights.select_assets(&w_cols).select_rows(&w_rows);
    Ok((px, w))
}
