//! Storage layer: silver-bar schema contract, Parquet reader, bronze
//! CSV ingest, and synthetic bars for demos and benchmarks.
//!
//! The engine never touches this module — it consumes a [`TimeMatrix`]
//! and is agnostic to where the bars came from.
//!
//! [`TimeMatrix`]: crate::domain::TimeMatrix

pub mod ingest;
pub mod schema;
pub mod store;
pub mod synthetic;

pub use ingest::{ingest_ohlcv_csv, IngestSpec};
pub use schema::{BarSchema, SchemaError};
pub use store::{load_bars, to_price_matrix, DataError};
pub use synthetic::synthetic_price_matrix;
