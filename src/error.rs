//! Error type shared by the grid layer and the TV solver.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TvError>;

/// Configuration errors reported by the solver. None of these are transient:
/// the solver never retries, the caller has to fix its inputs.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TvError {
    #[error("invalid configuration: {name} must be positive and finite (got {value})")]
    InvalidConfiguration { name: &'static str, value: f32 },
    #[error("shape mismatch for {what}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("invalid region #{index} (origin={origin:?}, size={size:?}): {reason}")]
    InvalidRegion {
        index: usize,
        origin: Vec<usize>,
        size: Vec<usize>,
        reason: &'static str,
    },
    #[error("no original image bound to the filter")]
    MissingOriginalImage,
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}
