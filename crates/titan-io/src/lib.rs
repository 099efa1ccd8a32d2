//! Loading labelled datasets from CSV and persisting trained models as JSON.

pub mod dataset;
pub mod error;
pub mod snapshot;

pub use dataset::Dataset;
pub use error::{IoError, IoResult};
pub use snapshot::ModelSnapshot;
