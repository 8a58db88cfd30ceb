//! Input validation and index normalization.
//!
//! The validator never touches caller memory: normalization produces a
//! private, date-sorted copy of each table, so two runs sharing one
//! input matrix can never corrupt each other.

use super::error::InputError;
use super::BacktestConfig;
use crate::domain::TimeMatrix;

/// Check the scalar configuration.
///
/// The leverage ceiling is validated here, at the boundary, so the
/// enforcer itself can assume a sane ceiling.
pub fn validate_config(config: &BacktestConfig) -> Result<(), InputError> {
    if !(config.initial_equity > 0.0) || !config.initial_equity.is_finite() {
        return Err(InputError::NonPositiveEquity(config.initial_equity));
    }
    if let Some(ceiling) = config.gross_leverage_max {
        if !(ceiling > 0.0) || !ceiling.is_finite() {
            return Err(InputError::NonPositiveLeverageCeiling(ceiling));
        }
    }
    Ok(())
}

/// Reject empty tables and return a copy sorted by strictly increasing
/// date, failing on duplicate dates.
pub fn normalize(table: &TimeMatrix, name: &'static str) -> Result<TimeMatrix, InputError> {
    if table.is_empty() {
        return Err(InputError::EmptyTable(name));
    }

    let mut order: Vec<usize> = (0..table.n_rows()).collect();
    order.sort_by_key(|&i| table.dates()[i]);

    let sorted = table.select_rows(&order);
    for pair in sorted.dates().windows(2) {
        if pair[0] == pair[1] {
            return Err(InputError::DuplicateDate {
                table: name,
                date: pair[0],
            });
        }
    }
    Ok(sorted)
}
