use thiserror::Error;
use titan_core::LearnError;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Learn(#[from] LearnError),

    #[error("line {line}: cannot parse {value:?} as a number")]
    Parse { line: u64, value: String },

    #[error("line {line}: expected {expected} fields, got {got}")]
    RaggedRecord {
        line: u64,
        expected: usize,
        got: usize,
    },

    #[error("dataset has no data rows")]
    EmptyDataset,
}

pub type IoResult<T> = Result<T, IoError>;
