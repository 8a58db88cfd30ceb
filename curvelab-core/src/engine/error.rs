//! Engine error taxonomy.
//!
//! Three disjoint failure classes, surfaced synchronously and never
//! retried: malformed inputs, missing data under `raise`, and leverage
//! ceiling violations. A failed run produces no partial result.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use crate::domain::MatrixError;

/// Malformed or insufficient inputs.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{0} matrix is empty")]
    EmptyTable(&'static str),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error("{table} index contains duplicate date {date}")]
    DuplicateDate {
        table: &'static str,
        date: NaiveDate,
    },

    #[error("initial_equity must be a positive finite number, got {0}")]
    NonPositiveEquity(f64),

    #[error("prices and weights share no common asset column")]
    NoCommonAssets,

    #[error("need at least 2 common dates between prices and weights, found {0}")]
    TooFewCommonDates(usize),

    #[error("gross_leverage_max must be a positive finite number, got {0}")]
    NonPositiveLeverageCeiling(f64),
}

/// Pipeline stage at which a missing value was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Aligned prices/weights, before return computation.
    Aligned,
    /// Computed returns and lagged weights.
    PostLag,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Aligned => write!(f, "aligned"),
            Stage::PostLag => write!(f, "post-lag"),
        }
    }
}

/// Missing values encountered under the `raise` policy, or a `drop`
/// masking that left nothing to compound.
#[derive(Debug, Error)]
pub enum DataQualityError {
    #[error("NaN in {table} at {date} ({stage} stage) under nan_policy=raise")]
    MissingValues {
        table: &'static str,
        date: NaiveDate,
        stage: Stage,
    },

    #[error("drop policy removed every row; no complete return/weight observations remain")]
    AllRowsMasked,
}

/// Gross exposure exceeded the configured ceiling.
#[derive(Debug, Error)]
#[error("gross leverage exceeds limit on {date}: {observed:.6} > {ceiling:.6}")]
pub struct LeverageError {
    /// First offending date, in index order.
    pub date: NaiveDate,
    pub observed: f64,
    pub ceiling: f64,
}

/// Top-level engine error.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    DataQuality(#[from] DataQualityError),

    #[error(transparent)]
    Leverage(#[from] LeverageError),
}
