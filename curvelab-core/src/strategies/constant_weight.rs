//! Constant target weight on a single asset.

use serde::{Deserialize, Serialize};

use super::{Strategy, StrategyError};
use crate::domain::{Symbol, TimeMatrix};

/// Hold one symbol at a fixed target weight; every other asset at 0.
///
/// The weight is a signed fraction of notional equity: +1.0 is 100%
/// long, -2.0 is 200% short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantWeight {
    pub symbol: Symbol,
    pub weight: f64,
}

impl ConstantWeight {
    pub fn new(symbol: impl Into<Symbol>, weight: f64) -> Self {
        Self {
            symbol: symbol.into(),
            weight,
        }
    }
}

impl Strategy for ConstantWeight {
    fn name(&self) -> &'static str {
        "constant_weight"
    }

    fn generate_weights(&self, prices: &TimeMatrix) -> Result<TimeMatrix, StrategyError> {
        let target = prices.asset_position(&self.symbol).ok_or_else(|| {
            StrategyError::UnknownSymbol {
                symbol: self.symbol.clone(),
                available: prices.assets().to_vec(),
            }
        })?;

        let n = prices.n_rows();
        let values = (0..prices.n_assets())
            .map(|a| vec![if a == target { self.weight } else { 0.0 }; n])
            .collect();
        Ok(TimeMatrix::from_parts_unchecked(
            prices.dates().to_vec(),
            prices.assets().to_vec(),
            values,
        ))
    }
}
