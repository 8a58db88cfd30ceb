//! Missing-data policy application.
//!
//! Three policies: `fill` patches holes (prices by directional fill,
//! weights with zero), `raise` fails on the first hole it sees, and
//! `drop` defers to a post-lag row mask. The policy layer runs twice:
//! on the aligned pair, and again on the computed returns and lagged
//! weights (the shift itself manufactures NaN rows at the series start).

use super::error::{DataQualityError, Stage};
use super::FillMethod;
use crate::domain::TimeMatrix;

/// Fill missing prices column by column.
pub fn fill_prices(prices: &TimeMatrix, method: FillMethod) -> TimeMatrix {
    match method {
        FillMethod::Forward => fill_directional(prices, false),
        FillMethod::Backward => fill_directional(prices, true),
    }
}

fn fill_directional(m: &TimeMatrix, reverse: bool) -> TimeMatrix {
    let n = m.n_rows();
    let values = (0..m.n_assets())
        .map(|a| {
            let col = m.column(a);
            let mut out = col.to_vec();
            let mut last = f64::NAN;
            let idx: Box<dyn Iterator<Item = usize>> = if reverse {
                Box::new((0..n).rev())
            } else {
                Box::new(0..n)
            };
            for t in idx {
                if out[t].is_nan() {
                    out[t] = last;
                } else {
                    last = out[t];
                }
            }
            out
        })
        .collect();
    TimeMatrix::from_parts_unchecked(m.dates().to_vec(), m.assets().to_vec(), values)
}

/// Replace missing weights with 0 (no position).
pub fn zero_fill_weights(weights: &TimeMatrix) -> TimeMatrix {
    weights.map_values(|v| if v.is_nan() { 0.0 } else { v })
}

/// Fail on the first NaN in either table, naming the table, the date,
/// and the pipeline stage. Checks `a` exhaustively before `b`.
pub fn require_complete(
    a: &TimeMatrix,
    a_name: &'static str,
    b: &TimeMatrix,
    b_name: &'static str,
    stage: Stage,
) -> Result<(), DataQualityError> {
    for (table, name) in [(a, a_name), (b, b_name)] {
        for t in 0..table.n_rows() {
            if table.row(t).any(|v| v.is_nan()) {
                return Err(DataQualityError::MissingValues {
                    table: name,
                    date: table.dates()[t],
                    stage,
                });
            }
        }
    }
    Ok(())
}

/// `drop` policy: keep only rows where every asset's return AND lagged
/// weight is present. Fails if nothing survives.
pub fn mask_incomplete_rows(
    returns: &TimeMatrix,
    weights: &TimeMatrix,
) -> Result<(TimeMatrix, TimeMatrix), DataQualityError> {
    let keep: Vec<usize> = (0..returns.n_rows())
        .filter(|&t| {
            returns.row(t).all(|v| !v.is_nan()) && weights.row(t).all(|v| !v.is_nan())
        })
        .collect();
    if keep.is_empty() {
        return Err(DataQualityError::AllRowsMasked);
    }
    Ok((returns.select_rows(&keep), weights.select_rows(&keep)))
}
