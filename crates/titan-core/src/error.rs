use thiserror::Error;

/// Error type shared by every numeric and model operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LearnError {
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Index out of range: index {index} for axis {axis} with size {size}")]
    IndexOutOfRange {
        index: usize,
        axis: usize,
        size: usize,
    },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Model must be trained before prediction")]
    NotTrained,

    #[error("Not fitted: {0}")]
    NotFitted(String),

    #[error("Invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),
}

pub type LearnResult<T> = Result<T, LearnError>;
