//! Date-indexed scalar series (equity curve, exposures, turnover).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::matrix::MatrixError;

/// A date-indexed series of scalar values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series, rejecting mismatched axis lengths.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self, MatrixError> {
        if dates.len() != values.len() {
            return Err(MatrixError::RaggedColumn {
                asset: "<series>".into(),
                len: values.len(),
                expected: dates.len(),
            });
        }
        Ok(Self { dates, values })
    }

    pub(crate) fn from_parts_unchecked(dates: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { dates, values }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.iter().next()
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.iter().next_back()
    }

    /// Iterate (date, value) pairs in index order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}
