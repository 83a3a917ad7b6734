//! Error types for tick generation.
//!
//! Most degenerate inputs recover internally (widened ranges, empty tick
//! lists, unrounded bounds); the only hard error is a logarithmic axis
//! asked to tick a non-positive range.

use thiserror::Error;

pub type ScaleResult<T> = Result<T, ScaleError>;

#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("log scale range must be positive: lower={lower}, upper={upper}")]
    NonPositiveLogRange { lower: f64, upper: f64 },
}
