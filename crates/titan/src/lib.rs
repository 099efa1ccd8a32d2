//! # Titan-Learn
//!
//! Dense numeric containers and a binary logistic regression pipeline.
//!
//! ## Modules
//!
//! - **core**: NumericBuffer storage, Matrix and Vector arithmetic, error types
//! - **stats**: per-feature mean, median, variance and range reports
//! - **preprocessing**: MinMaxScaler, train/test split
//! - **linear**: Logistic Regression trained by full-batch gradient descent
//! - **metrics**: accuracy, precision, recall, F1, confusion matrix, model report
//! - **io**: CSV dataset loading, JSON model snapshots

/// Numeric containers and errors.
pub use titan_core as core;

/// Descriptive statistics.
pub use titan_stats as stats;

/// Data preprocessing.
pub use titan_preprocessing as preprocessing;

/// Linear models.
pub use titan_linear as linear;

/// Evaluation metrics.
pub use titan_metrics as metrics;

/// Dataset and model I/O.
pub use titan_io as io;
