pub mod descriptive;
pub mod summary;

pub use descriptive::*;
pub use summary::*;
