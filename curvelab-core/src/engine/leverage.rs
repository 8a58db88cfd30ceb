//! Gross leverage ceiling enforcement.
//!
//! Leverage is defined on realized exposure: the check runs on the
//! final weights actually used for return computation (post-lag, and
//! under `drop`, post-mask), not on raw target weights. Violation is a
//! hard failure, never a silent clamp.

use super::error::LeverageError;
use crate::domain::TimeMatrix;

/// Tolerance absorbing floating-point noise in the gross sum.
const GROSS_TOLERANCE: f64 = 1e-12;

/// Fail on the first date (index order) where Σ|w| exceeds `ceiling`
/// by more than the tolerance. The ceiling itself is validated at the
/// configuration boundary.
pub fn enforce_gross_ceiling(weights_used: &TimeMatrix, ceiling: f64) -> Result<(), LeverageError> {
    for t in 0..weights_used.n_rows() {
        let gross: f64 = weights_used
            .row(t)
            .filter(|v| !v.is_nan())
            .map(f64::abs)
            .sum();
        if gross > ceiling + GROSS_TOLERANCE {
            return Err(LeverageError {
                date: weights_used.dates()[t],
                observed: gross,
                ceiling,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn two_asset(w_a: Vec<f64>, w_b: Vec<f64>) -> TimeMatrix {
        let base = d("2024-01-02");
        let dates = (0..w_a.len())
            .map(|i| base + chrono::Duration::days(i as i64))
            .collect();
        TimeMatrix::new(dates, vec!["A".into(), "B".into()], vec![w_a, w_b]).unwrap()
    }

    #[test]
    fn reports_first_offending_date() {
        let w = two_asset(vec![1.0, 2.0, 2.0], vec![0.5, 1.0, 1.0]);
        let err = enforce_gross_ceiling(&w, 2.0).unwrap_err();
        assert_eq!(err.date, d("2024-01-03"));
        assert!((err.observed - 3.0).abs() < 1e-12);
        assert_eq!(err.ceiling, 2.0);
    }

    #[test]
    fn exact_ceiling_passes() {
        let w = two_asset(vec![1.0, 1.0], vec![-1.0, -1.0]);
        assert!(enforce_gross_ceiling(&w, 2.0).is_ok());
    }

    #[test]
    fn nan_weights_are_skipped_in_gross() {
        let w = two_asset(vec![f64::NAN, 1.0], vec![1.5, 0.5]);
        assert!(enforce_gross_ceiling(&w, 2.0).is_ok());
    }
}
