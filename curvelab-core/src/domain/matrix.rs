//! Wide date-indexed matrix: one row per date, one column per asset.
//!
//! Missing cells are strict `f64::NAN` (no forward-fill at this layer —
//! filling is a policy decision made inside the engine). Rectangularity
//! and column-name uniqueness are enforced at construction, so every
//! `TimeMatrix` handed to the engine is a genuine 2-D numeric table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Symbol;

/// Errors from matrix construction.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("column '{asset}' has {len} values but the date axis has {expected}")]
    RaggedColumn {
        asset: String,
        len: usize,
        expected: usize,
    },

    #[error("duplicate asset column '{0}'")]
    DuplicateAsset(String),

    #[error("{assets} asset names but {columns} value columns")]
    ColumnCountMismatch { assets: usize, columns: usize },
}

/// A date-indexed wide table of per-asset values.
///
/// Storage is column-major: `values[a][t]` is asset `a` at date index `t`.
/// The matrix is a value type — pipeline stages never mutate one in place,
/// they build a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeMatrix {
    dates: Vec<NaiveDate>,
    assets: Vec<Symbol>,
    values: Vec<Vec<f64>>,
}

impl TimeMatrix {
    /// Build a matrix, rejecting ragged columns and duplicate asset names.
    ///
    /// Dates are taken as given; sorting/duplicate-date normalization is
    /// the engine validator's job (on a private copy).
    pub fn new(
        dates: Vec<NaiveDate>,
        assets: Vec<Symbol>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, MatrixError> {
        if assets.len() != values.len() {
            return Err(MatrixError::ColumnCountMismatch {
                assets: assets.len(),
                columns: values.len(),
            });
        }
        for (asset, column) in assets.iter().zip(&values) {
            if column.len() != dates.len() {
                return Err(MatrixError::RaggedColumn {
                    asset: asset.clone(),
                    len: column.len(),
                    expected: dates.len(),
                });
            }
        }
        for (i, asset) in assets.iter().enumerate() {
            if assets[..i].contains(asset) {
                return Err(MatrixError::DuplicateAsset(asset.clone()));
            }
        }
        Ok(Self {
            dates,
            assets,
            values,
        })
    }

    /// Constant-valued matrix over the given axes.
    pub fn constant(
        dates: Vec<NaiveDate>,
        assets: Vec<Symbol>,
        value: f64,
    ) -> Result<Self, MatrixError> {
        let n = dates.len();
        let values = vec![vec![value; n]; assets.len()];
        Self::new(dates, assets, values)
    }

    /// Internal constructor for pipeline stages that already hold the
    /// invariants (same-length columns, unique assets).
    pub(crate) fn from_parts_unchecked(
        dates: Vec<NaiveDate>,
        assets: Vec<Symbol>,
        values: Vec<Vec<f64>>,
    ) -> Self {
        debug_assert!(values.len() == assets.len());
        debug_assert!(values.iter().all(|c| c.len() == dates.len()));
        Self {
            dates,
            assets,
            values,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.dates.len()
    }

    pub fn n_assets(&self) -> usize {
        self.assets.len()
    }

    /// True if the matrix has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.assets.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn assets(&self) -> &[Symbol] {
        &self.assets
    }

    /// Column values by position.
    pub fn column(&self, asset_idx: usize) -> &[f64] {
        &self.values[asset_idx]
    }

    /// Column values by asset name.
    pub fn column_by_name(&self, asset: &str) -> Option<&[f64]> {
        self.asset_position(asset).map(|i| self.column(i))
    }

    /// Position of an asset in the column axis.
    pub fn asset_position(&self, asset: &str) -> Option<usize> {
        self.assets.iter().position(|a| a == asset)
    }

    /// Cell value at (row, column).
    pub fn value(&self, row: usize, asset_idx: usize) -> f64 {
        self.values[asset_idx][row]
    }

    /// Iterate one row as (asset index, value) pairs.
    pub fn row(&self, row: usize) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(move |col| col[row])
    }

    /// True if any cell in the matrix is NaN.
    pub fn has_nan(&self) -> bool {
        self.values.iter().flatten().any(|v| v.is_nan())
    }

    /// New matrix restricted to the given row indices, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        let dates = rows.iter().map(|&r| self.dates[r]).collect();
        let values = self
            .values
            .iter()
            .map(|col| rows.iter().map(|&r| col[r]).collect())
            .collect();
        Self::from_parts_unchecked(dates, self.assets.clone(), values)
    }

    /// New matrix restricted to the given column indices, in the given order.
    pub fn select_assets(&self, cols: &[usize]) -> Self {
        let assets = cols.iter().map(|&c| self.assets[c].clone()).collect();
        let values = cols.iter().map(|&c| self.values[c].clone()).collect();
        Self::from_parts_unchecked(self.dates.clone(), assets, values)
    }

    /// New matrix with every cell passed through `f` (column by column).
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        let values = self
            .values
            .iter()
            .map(|col| col.iter().map(|&v| f(v)).collect())
            .collect();
        Self::from_parts_unchecked(self.dates.clone(), self.assets.clone(), values)
    }
}
