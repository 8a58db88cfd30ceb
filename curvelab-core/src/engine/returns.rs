//! Per-asset simple returns.

use crate::domain::TimeMatrix;

/// `r[t] = p[t] / p[t-1] - 1`, per column.
///
/// Row 0 has no predecessor and is NaN by construction. A NaN price on
/// either side of the ratio propagates into the return; there is no
/// implicit filling here (that is the policy layer's decision).
pub fn simple_returns(prices: &TimeMatrix) -> TimeMatrix {
    let n = prices.n_rows();
    let values = (0..prices.n_assets())
        .map(|a| {
            let col = prices.column(a);
            let mut out = vec![f64::NAN; n];
            for t in 1..n {
                out[t] = col[t] / col[t - 1] - 1.0;
            }
            out
        })
        .collect();
    TimeMatrix::from_parts_unchecked(prices.dates().to_vec(), prices.assets().to_vec(), values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn matrix(vals: Vec<f64>) -> TimeMatrix {
        let base: NaiveDate = "2024-01-02".parse().unwrap();
        let dates = (0..vals.len())
            .map(|i| base + chrono::Duration::days(i as i64))
            .collect();
        TimeMatrix::new(dates, vec!["SPY".into()], vec![vals]).unwrap()
    }

    #[test]
    fn first_row_is_nan() {
        let r = simple_returns(&matrix(vec![100.0, 110.0, 121.0]));
        assert!(r.column(0)[0].is_nan());
        assert!((r.column(0)[1] - 0.1).abs() < 1e-12);
        assert!((r.column(0)[2] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn nan_price_propagates_both_sides() {
        let r = simple_returns(&matrix(vec![100.0, f64::NAN, 121.0]));
        assert!(r.column(0)[1].is_nan());
        assert!(r.column(0)[2].is_nan());
    }
}
