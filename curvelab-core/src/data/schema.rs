//! Silver bar schema contract.
//!
//! Defines the exact column names and dtypes of stored bars — the
//! boundary between the ingest/storage layer and the matrix builder.
//!
//! - Columns: timestamp, symbol, open, high, low, close, volume
//!   (provenance extras such as quote_ccy may ride along; validation
//!   checks only the required set)
//! - Sort order: ascending by (timestamp, symbol)
//! - Missing bars: absent rows (the matrix builder turns absence into
//!   strict NaN; no forward-fill in storage)

use polars::prelude::*;

/// The canonical silver bar schema.
pub struct BarSchema;

impl BarSchema {
    pub fn schema() -> Schema {
        Schema::from_iter(vec![
            Field::new("timestamp".into(), DataType::Date),
            Field::new("symbol".into(), DataType::String),
            Field::new("open".into(), DataType::Float64),
            Field::new("high".into(), DataType::Float64),
            Field::new("low".into(), DataType::Float64),
            Field::new("close".into(), DataType::Float64),
            Field::new("volume".into(), DataType::Float64),
        ])
    }

    /// Validate a DataFrame against the contract.
    pub fn validate(df: &DataFrame) -> Result<(), SchemaError> {
        let expected = Self::schema();
        let actual = df.schema();

        for field in expected.iter_fields() {
            let actual_dtype = actual
                .get(field.name())
                .ok_or_else(|| SchemaError::MissingColumn(field.name().to_string()))?;
            if actual_dtype != field.dtype() {
                return Err(SchemaError::TypeMismatch {
                    column: field.name().to_string(),
                    expected: field.dtype().clone(),
                    actual: actual_dtype.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("type mismatch in column {column}: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },
}
