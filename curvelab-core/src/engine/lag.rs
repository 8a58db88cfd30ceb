//! Weight lag: delay decided weights before they earn returns.
//!
//! A weight observed at date t applies to the return realized over the
//! interval ending at t + lag. Shifting manufactures NaN rows at the
//! series start; the active missing-data policy resolves them.

use crate::domain::TimeMatrix;

/// Shift every column forward by `lag` rows. The first `lag` rows
/// become NaN. `lag = 0` is the identity (same-period pairing — only
/// valid when the caller accepts look-ahead).
pub fn shift_rows(weights: &TimeMatrix, lag: usize) -> TimeMatrix {
    if lag == 0 {
        return weights.clone();
    }
    let n = weights.n_rows();
    let values = (0..weights.n_assets())
        .map(|a| {
            let col = weights.column(a);
            let mut out = vec![f64::NAN; n];
            for t in lag..n {
                out[t] = col[t - lag];
            }
            out
        })
        .collect();
    TimeMatrix::from_parts_unchecked(weights.dates().to_vec(), weights.assets().to_vec(), values)
}
