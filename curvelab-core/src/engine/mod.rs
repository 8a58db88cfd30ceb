//! Backtest engine — a pure, single-threaded pipeline from a price
//! matrix and a weight matrix to an equity curve and diagnostics.
//!
//! Stage order (data flows strictly forward; no stage depends on a
//! later one):
//!
//! 1. Validate scalars, normalize each table to a sorted private copy
//! 2. Align to common assets and dates
//! 3. Apply the missing-data policy to the aligned pair
//! 4. Compute per-asset simple returns
//! 5. Lag weights (no look-ahead)
//! 6. Re-apply the policy to returns and lagged weights
//! 7. Enforce the optional gross-leverage ceiling
//! 8. Derive exposure/turnover, aggregate and compound returns
//! 9. Assemble the immutable result bundle

pub mod align;
pub mod equity;
pub mod error;
pub mod exposure;
pub mod lag;
pub mod leverage;
pub mod policy;
pub mod result;
pub mod returns;
pub mod validate;

pub use error::{BacktestError, DataQualityError, InputError, LeverageError, Stage};
pub use result::{BacktestResult, RunMetadata};

use serde::{Deserialize, Serialize};

use crate::domain::TimeMatrix;

/// What to do about missing values in prices, weights, and the series
/// derived from them. Closed set; unknown names are rejected when
/// deserializing a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NanPolicy {
    /// Mask out any post-lag row with a missing return or weight.
    Drop,
    /// Fill prices directionally, weights with zero.
    Fill,
    /// Fail on the first missing value.
    Raise,
}

impl NanPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NanPolicy::Drop => "drop",
            NanPolicy::Fill => "fill",
            NanPolicy::Raise => "raise",
        }
    }
}

/// Direction used to fill missing prices under [`NanPolicy::Fill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillMethod {
    /// Carry the last observed price forward.
    #[serde(rename = "ffill")]
    Forward,
    /// Pull the next observed price backward.
    #[serde(rename = "bfill")]
    Backward,
}

impl FillMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FillMethod::Forward => "ffill",
            FillMethod::Backward => "bfill",
        }
    }
}

/// Scalar configuration for one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Starting equity for the compounded curve. Must be > 0.
    pub initial_equity: f64,
    /// Periods a decided weight is delayed before it earns returns.
    /// 0 pairs weights with same-period returns (accepts look-ahead).
    pub weight_lag: usize,
    pub nan_policy: NanPolicy,
    pub price_fill_method: FillMethod,
    /// Gross exposure ceiling; `None` disables enforcement.
    pub gross_leverage_max: Option<f64>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_equity: 100.0,
            weight_lag: 1,
            nan_policy: NanPolicy::Drop,
            price_fill_method: FillMethod::Forward,
            gross_leverage_max: None,
        }
    }
}

/// Run the full pipeline. Either a complete [`BacktestResult`] comes
/// back, or an error and no result — there are no partial outputs.
///
/// The caller's matrices are never mutated; every stage works on
/// private copies, so concurrent runs may share the same inputs.
pub fn run_backtest(
    prices: &TimeMatrix,
    weights: &TimeMatrix,
    config: &BacktestConfig,
) -> Result<BacktestResult, BacktestError> {
    validate::validate_config(config)?;
    let px = validate::normalize(prices, "prices")?;
    let w = validate::normalize(weights, "weights")?;

    let (px, w) = align::align(&px, &w)?;

    let (px, w) = match config.nan_policy {
        NanPolicy::Fill => (
            policy::fill_prices(&px, config.price_fill_method),
            policy::zero_fill_weights(&w),
        ),
        NanPolicy::Raise => {
            policy::require_complete(&px, "prices", &w, "weights", Stage::Aligned)?;
            (px, w)
        }
        NanPolicy::Drop => (px, w),
    };

    let asset_returns = returns::simple_returns(&px);
    let mut weights_used = lag::shift_rows(&w, config.weight_lag);

    // Second policy pass: the shift manufactures NaN rows at the start.
    match config.nan_policy {
        NanPolicy::Fill => weights_used = policy::zero_fill_weights(&weights_used),
        NanPolicy::Raise => policy::require_complete(
            &asset_returns,
            "returns",
            &weights_used,
            "weights",
            Stage::PostLag,
        )?,
        NanPolicy::Drop => {}
    }

    let (asset_returns, weights_used) = match config.nan_policy {
        NanPolicy::Drop => policy::mask_incomplete_rows(&asset_returns, &weights_used)?,
        _ => (asset_returns, weights_used),
    };

    // Ceiling applies to the weights actually used — post-lag and,
    // under drop, post-mask.
    if let Some(ceiling) = config.gross_leverage_max {
        leverage::enforce_gross_ceiling(&weights_used, ceiling)?;
    }

    let (start, end) = match (asset_returns.dates().first(), asset_returns.dates().last()) {
        (Some(s), Some(e)) => (*s, *e),
        _ => return Err(DataQualityError::AllRowsMasked.into()),
    };

    let gross_exposure = exposure::gross_exposure(&weights_used);
    let net_exposure = exposure::net_exposure(&weights_used);
    let turnover = exposure::turnover(&weights_used);

    let portfolio_returns = equity::portfolio_returns(&weights_used, &asset_returns);
    let equity_curve = equity::compound(&portfolio_returns, config.initial_equity);

    Ok(result::assemble(
        equity_curve,
        portfolio_returns,
        weights_used,
        asset_returns,
        gross_exposure,
        net_exposure,
        turnover,
        config,
        start,
        end,
    ))
}
