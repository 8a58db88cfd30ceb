//! Weight-generation strategies.
//!
//! A strategy turns a price matrix into a target weight matrix on the
//! same axes. The engine does not require exact alignment — its aligner
//! reconciles the two tables — but strategies built here produce
//! matching axes by construction.

pub mod constant_weight;

pub use constant_weight::ConstantWeight;

use crate::domain::{Symbol, TimeMatrix};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("symbol '{symbol}' not found in price columns: {available:?}")]
    UnknownSymbol {
        symbol: Symbol,
        available: Vec<Symbol>,
    },
}

/// Target-weight generator over a wide price matrix.
pub trait Strategy {
    /// Human-readable strategy name for run summaries.
    fn name(&self) -> &'static str;

    /// Produce target weights aligned to `prices`' dates and assets.
    fn generate_weights(&self, prices: &TimeMatrix) -> Result<TimeMatrix, StrategyError>;
}
