//! Domain types for CurveLab — wide date-indexed tables and scalar series.

pub mod matrix;
pub mod series;

pub use matrix::{MatrixError, TimeMatrix};
pub use series::TimeSeries;

/// Asset identifier type alias.
pub type Symbol = String;
