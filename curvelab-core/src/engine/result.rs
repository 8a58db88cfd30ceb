//! Result bundle: every series the run produced plus run metadata.
//!
//! Pure assembly — nothing here recomputes anything. The bundle is
//! constructed once per engine invocation and never mutated.

use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;

use super::{BacktestConfig, FillMethod, NanPolicy};
use crate::domain::{TimeMatrix, TimeSeries};

/// Scalar facts about a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetadata {
    pub initial_equity: f64,
    pub weight_lag: usize,
    pub nan_policy: NanPolicy,
    pub price_fill_method: FillMethod,
    pub gross_leverage_max: Option<f64>,
    pub n_assets: usize,
    /// First date of the final series.
    pub start: NaiveDate,
    /// Last date of the final series.
    pub end: NaiveDate,
}

/// Everything a backtest run produced.
///
/// All series share one date axis: the post-policy axis of the asset
/// return matrix. The bundle owns no reference back to the caller's
/// price/weight inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    /// Compounded equity curve.
    pub equity: TimeSeries,
    /// Per-date portfolio return.
    pub returns: TimeSeries,
    /// Weights actually used (post-lag, post-policy).
    pub weights_used: TimeMatrix,
    /// Per-asset simple returns.
    pub asset_returns: TimeMatrix,
    /// Σ|w| per date.
    pub gross_exposure: TimeSeries,
    /// Σw per date.
    pub net_exposure: TimeSeries,
    /// 0.5 · Σ|Δw| per date, 0 at the first date.
    pub turnover: TimeSeries,
    pub metadata: RunMetadata,
}

impl BacktestResult {
    /// Flatten the five scalar series into one DataFrame
    /// (date, equity, returns, gross_exposure, net_exposure, turnover)
    /// for display or export.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let date = DateChunked::from_naive_date(
            "date".into(),
            self.equity.dates().iter().copied(),
        )
        .into_series()
        .into_column();
        DataFrame::new(vec![
            date,
            Column::new("equity".into(), self.equity.values()),
            Column::new("returns".into(), self.returns.values()),
            Column::new("gross_exposure".into(), self.gross_exposure.values()),
            Column::new("net_exposure".into(), self.net_exposure.values()),
            Column::new("turnover".into(), self.turnover.values()),
        ])
    }
}

/// Package the series and derive the metadata record from the config
/// and the final date axis.
#[allow(clippy::too_many_arguments)]
pub(super) fn assemble(
    equity: TimeSeries,
    returns: TimeSeries,
    weights_used: TimeMatrix,
    asset_returns: TimeMatrix,
    gross_exposure: TimeSeries,
    net_exposure: TimeSeries,
    turnover: TimeSeries,
    config: &BacktestConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> BacktestResult {
    let metadata = RunMetadata {
        initial_equity: config.initial_equity,
        weight_lag: config.weight_lag,
        nan_policy: config.nan_policy,
        price_fill_method: config.price_fill_method,
        gross_leverage_max: config.gross_leverage_max,
        n_assets: asset_returns.n_assets(),
        start,
        end,
    };
    BacktestResult {
        equity,
        returns,
        weights_used,
        asset_returns,
        gross_exposure,
        net_exposure,
        turnover,
        metadata,
    }
}
