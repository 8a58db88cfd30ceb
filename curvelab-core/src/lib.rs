//! CurveLab Core — vectorized portfolio backtesting over wide matrices.
//!
//! This crate contains:
//! - Domain types: date-indexed wide matrices and scalar series
//! - The backtest engine: validation, alignment, missing-data policy,
//!   weight lag, leverage enforcement, exposure/turnover, equity
//!   compounding
//! - The storage layer: silver-bar schema, Parquet reader, bronze CSV
//!   ingest, synthetic bars
//! - Strategies: the weight-generation seam and the constant-weight
//!   baseline
//!
//! The engine itself is a pure function: no I/O, no shared state, same
//! inputs → bit-identical result.

pub mod data;
pub mod domain;
pub mod engine;
pub mod strategies;

pub use engine::{run_backtest, BacktestConfig, BacktestError, BacktestResult};
