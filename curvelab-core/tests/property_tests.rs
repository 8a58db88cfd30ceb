//! Property tests for pipeline invariants.
//!
//! 1. Purity — rerunning with identical inputs is bit-identical
//! 2. Gross exposure dominates |net exposure| at every date
//! 3. All result series share one axis, turnover pinned to 0 at start
//! 4. Drop-policy length accounting: complete inputs lose exactly
//!    max(lag, 1) rows

use chrono::NaiveDate;
use curvelab_core::domain::TimeMatrix;
use curvelab_core::engine::{run_backtest, BacktestConfig, NanPolicy};
use proptest::prelude::*;

fn dates(n: usize) -> Vec<NaiveDate> {
    let base: NaiveDate = "2021-06-01".parse().unwrap();
    (0..n)
        .map(|i| base + chrono::Duration::days(i as i64))
        .collect()
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_weight() -> impl Strategy<Value = f64> {
    (-2.0..2.0_f64).prop_map(|w| (w * 100.0).round() / 100.0)
}

/// Complete (hole-free) price and weight matrices on shared axes.
fn arb_pair() -> impl Strategy<Value = (TimeMatrix, TimeMatrix)> {
    (4_usize..24, 1_usize..4).prop_flat_map(|(n, k)| {
        let prices = prop::collection::vec(prop::collection::vec(arb_price(), n), k);
        let weights = prop::collection::vec(prop::collection::vec(arb_weight(), n), k);
        (prices, weights).prop_map(move |(px_cols, w_cols)| {
            let assets: Vec<String> = (0..k).map(|i| format!("A{i}")).collect();
            let px = TimeMatrix::new(dates(n), assets.clone(), px_cols).unwrap();
            let w = TimeMatrix::new(dates(n), assets, w_cols).unwrap();
            (px, w)
        })
    })
}

proptest! {
    /// Same inputs, same config — bit-identical results.
    #[test]
    fn rerun_is_pure((px, w) in arb_pair(), lag in 0_usize..3) {
        let config = BacktestConfig { weight_lag: lag, ..BacktestConfig::default() };
        let a = run_backtest(&px, &w, &config).unwrap();
        let b = run_backtest(&px, &w, &config).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Σ|w| ≥ |Σw| on every date, whatever the weights.
    #[test]
    fn gross_dominates_net((px, w) in arb_pair()) {
        let res = run_backtest(&px, &w, &BacktestConfig::default()).unwrap();
        for (gross, net) in res.gross_exposure.values().iter().zip(res.net_exposure.values()) {
            prop_assert!(*gross >= net.abs() - 1e-12);
        }
    }

    /// Every series the result carries lives on one shared date axis,
    /// and the first turnover value is exactly zero.
    #[test]
    fn series_share_one_axis((px, w) in arb_pair(), lag in 0_usize..3) {
        let config = BacktestConfig { weight_lag: lag, ..BacktestConfig::default() };
        let res = run_backtest(&px, &w, &config).unwrap();

        let axis = res.equity.dates();
        prop_assert_eq!(res.returns.dates(), axis);
        prop_assert_eq!(res.gross_exposure.dates(), axis);
        prop_assert_eq!(res.net_exposure.dates(), axis);
        prop_assert_eq!(res.turnover.dates(), axis);
        prop_assert_eq!(res.weights_used.dates(), axis);
        prop_assert_eq!(res.asset_returns.dates(), axis);

        prop_assert_eq!(res.turnover.values()[0], 0.0);
    }

    /// With complete inputs, drop masks exactly the rows the lag and
    /// the first return blank out: max(lag, 1).
    #[test]
    fn drop_length_accounting((px, w) in arb_pair(), lag in 0_usize..3) {
        let n = px.n_rows();
        let config = BacktestConfig {
            weight_lag: lag,
            nan_policy: NanPolicy::Drop,
            ..BacktestConfig::default()
        };
        let res = run_backtest(&px, &w, &config).unwrap();
        prop_assert_eq!(res.equity.len(), n - lag.max(1));
    }

    /// Fill policy keeps the full aligned axis.
    #[test]
    fn fill_keeps_full_axis((px, w) in arb_pair(), lag in 0_usize..3) {
        let n = px.n_rows();
        let config = BacktestConfig {
            weight_lag: lag,
            nan_policy: NanPolicy::Fill,
            ..BacktestConfig::default()
        };
        let res = run_backtest(&px, &w, &config).unwrap();
        prop_assert_eq!(res.equity.len(), n);
    }
}
