//! Bronze → silver ingest: raw OHLCV CSV files into the partitioned
//! silver Parquet tree.
//!
//! Bronze files are daily OHLCV exports with a header row of
//! timestamp, open, high, low, close, volume. Ingest normalizes the
//! timestamp to a Date, tags the symbol and quote currency, drops
//! duplicate days (first wins), sorts ascending, and writes one Parquet
//! part per symbol under a Hive-style partition path.

use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use super::schema::BarSchema;
use super::store::DataError;

/// Where a bronze file came from and where its silver part belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSpec {
    pub exchange: String,
    /// "spot" or "perp".
    pub market_type: String,
    /// Bar timeframe, e.g. "1d".
    pub timeframe: String,
    /// Quote currency, e.g. "USD". Written into each silver part as a
    /// `quote_ccy` column.
    pub quote_ccy: String,
}

impl IngestSpec {
    /// Partition path for one symbol:
    /// `exchange=…/market_type=…/timeframe=…/symbol=…/part-000.parquet`.
    pub fn partition_path(&self, silver_root: &Path, symbol: &str) -> PathBuf {
        silver_root
            .join(format!("exchange={}", self.exchange))
            .join(format!("market_type={}", self.market_type))
            .join(format!("timeframe={}", self.timeframe))
            .join(format!("symbol={symbol}"))
            .join("part-000.parquet")
    }
}

/// Ingest one bronze CSV into the silver tree. Returns the path of the
/// written Parquet part.
pub fn ingest_ohlcv_csv(
    csv_path: &Path,
    symbol: &str,
    spec: &IngestSpec,
    silver_root: &Path,
) -> Result<PathBuf, DataError> {
    let mut df = LazyCsvReader::new(csv_path)
        .with_has_header(true)
        .with_try_parse_dates(true)
        .finish()
        .map_err(|e| DataError::IngestFailed(e.to_string()))?
        .select([
            col("timestamp").cast(DataType::Date),
            lit(symbol).alias("symbol"),
            col("open").cast(DataType::Float64),
            col("high").cast(DataType::Float64),
            col("low").cast(DataType::Float64),
            col("close").cast(DataType::Float64),
            col("volume").cast(DataType::Float64),
            lit(spec.quote_ccy.as_str()).alias("quote_ccy"),
        ])
        .sort(
            ["timestamp"],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .unique_stable(Some(vec!["timestamp".into()]), UniqueKeepStrategy::First)
        .collect()
        .map_err(|e| DataError::IngestFailed(e.to_string()))?;

    BarSchema::validate(&df)?;

    let out_path = spec.partition_path(silver_root, symbol);
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(&out_path)?;
    ParquetWriter::new(file)
        .finish(&mut df)
        .map_err(|e| DataError::IngestFailed(e.to_string()))?;

    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_path_is_hive_style() {
        let spec = IngestSpec {
            exchange: "cryptoquant_agg".into(),
            market_type: "spot".into(),
            timeframe: "1d".into(),
            quote_ccy: "USD".into(),
        };
        let path = spec.partition_path(Path::new("data/silver/bars"), "BTCUSD");
        assert_eq!(
            path,
            Path::new(
                "data/silver/bars/exchange=cryptoquant_agg/market_type=spot/timeframe=1d/symbol=BTCUSD/part-000.parquet"
            )
        );
    }

    #[test]
    fn ingest_writes_sorted_deduped_parquet() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("bronze.csv");
        fs::write(
            &csv_path,
            "timestamp,open,high,low,close,volume\n\
             2024-01-03,109,112,108,110,2000\n\
             2024-01-02,99,101,98,100,1000\n\
             2024-01-02,99,101,98,999,1000\n",
        )
        .unwrap();

        let spec = IngestSpec {
            exchange: "test".into(),
            market_type: "spot".into(),
            timeframe: "1d".into(),
            quote_ccy: "USD".into(),
        };
        let silver_root = dir.path().join("silver");
        let out = ingest_ohlcv_csv(&csv_path, "BTCUSD", &spec, &silver_root).unwrap();

        let bars = crate::data::load_bars(&[out]).unwrap();
        assert_eq!(bars.height(), 2);
        let close = bars.column("close").unwrap().f64().unwrap();
        // sorted ascending, duplicate 2024-01-02 row dropped (first wins)
        assert_eq!(close.get(0), Some(100.0));
        assert_eq!(close.get(1), Some(110.0));
    }

    #[test]
    fn ingest_records_the_quote_currency() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("bronze.csv");
        fs::write(
            &csv_path,
            "timestamp,open,high,low,close,volume\n\
             2024-01-02,99,101,98,100,1000\n",
        )
        .unwrap();

        let spec = IngestSpec {
            exchange: "test".into(),
            market_type: "spot".into(),
            timeframe: "1d".into(),
            quote_ccy: "EUR".into(),
        };
        let out = ingest_ohlcv_csv(&csv_path, "BTCEUR", &spec, &dir.path().join("silver")).unwrap();

        let bars = crate::data::load_bars(&[out]).unwrap();
        let ccy = bars.column("quote_ccy").unwrap().str().unwrap();
        assert_eq!(ccy.get(0), Some("EUR"));
    }
}
