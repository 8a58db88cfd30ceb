//! Silver Parquet reader and long→wide matrix builder.
//!
//! `load_bars` produces one long bar frame from any number of silver
//! partitions; `to_price_matrix` pivots a chosen field into the wide,
//! date-indexed matrix the engine consumes. A (date, symbol) pair with
//! no bar becomes a strict-NaN cell — missing data is the engine's
//! policy decision, not the reader's.

use polars::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use super::schema::{BarSchema, SchemaError};
use crate::domain::TimeMatrix;

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("ingest failed: {0}")]
    IngestFailed(String),

    #[error("load failed: {0}")]
    LoadFailed(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("column '{0}' not found in bars")]
    MissingColumn(String),
}

/// Load silver bars from one or more Parquet files into a single long
/// frame, sorted by (timestamp, symbol) with duplicate bars dropped
/// (first occurrence wins), validated against [`BarSchema`].
pub fn load_bars<P: AsRef<Path>>(paths: &[P]) -> Result<DataFrame, DataError> {
    if paths.is_empty() {
        return Err(DataError::LoadFailed("no silver paths given".into()));
    }

    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        let lf = LazyFrame::scan_parquet(path.as_ref(), Default::default())
            .map_err(|e| DataError::LoadFailed(e.to_string()))?;
        frames.push(lf);
    }

    let df = concat(frames, UnionArgs::default())
        .map_err(|e| DataError::LoadFailed(e.to_string()))?
        .sort(
            ["timestamp", "symbol"],
            SortMultipleOptions::default()
                .with_order_descending_multi([false, false])
                .with_maintain_order(true),
        )
        .unique_stable(
            Some(vec!["timestamp".into(), "symbol".into()]),
            UniqueKeepStrategy::First,
        )
        .collect()
        .map_err(|e| DataError::LoadFailed(e.to_string()))?;

    BarSchema::validate(&df)?;
    Ok(df)
}

/// Pivot one bar field (`close`, `open`, …) into a wide price matrix.
///
/// The date axis is the union of all bar dates, ascending; the asset
/// axis follows first appearance in the (sorted) frame. Cells with no
/// bar are NaN.
pub fn to_price_matrix(bars: &DataFrame, field: &str) -> Result<TimeMatrix, DataError> {
    let timestamps = bars
        .column("timestamp")
        .map_err(|_| DataError::MissingColumn("timestamp".into()))?
        .date()
        .map_err(|e| DataError::LoadFailed(e.to_string()))?;
    let symbols = bars
        .column("symbol")
        .map_err(|_| DataError::MissingColumn("symbol".into()))?
        .str()
        .map_err(|e| DataError::LoadFailed(e.to_string()))?;
    let values = bars
        .column(field)
        .map_err(|_| DataError::MissingColumn(field.into()))?
        .f64()
        .map_err(|e| DataError::LoadFailed(e.to_string()))?;

    let mut dates = BTreeSet::new();
    let mut asset_order: Vec<String> = Vec::new();
    let mut cells: HashMap<String, HashMap<chrono::NaiveDate, f64>> = HashMap::new();

    for ((ts, sym), value) in timestamps
        .as_date_iter()
        .zip(symbols.iter())
        .zip(values.iter())
    {
        let (ts, sym) = match (ts, sym) {
            (Some(ts), Some(sym)) => (ts, sym),
            _ => {
                return Err(DataError::LoadFailed(
                    "null timestamp or symbol in bars".into(),
                ))
            }
        };
        dates.insert(ts);
        let per_symbol = cells.entry(sym.to_string()).or_insert_with(|| {
            asset_order.push(sym.to_string());
            HashMap::new()
        });
        per_symbol.insert(ts, value.unwrap_or(f64::NAN));
    }

    let dates: Vec<chrono::NaiveDate> = dates.into_iter().collect();
    let columns: Vec<Vec<f64>> = asset_order
        .iter()
        .map(|sym| {
            let per_symbol = &cells[sym];
            dates
                .iter()
                .map(|d| per_symbol.get(d).copied().unwrap_or(f64::NAN))
                .collect()
        })
        .collect();

    TimeMatrix::new(dates, asset_order, columns)
        .map_err(|e| DataError::LoadFailed(e.to_string()))
}
