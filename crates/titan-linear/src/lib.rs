pub mod classifier;
pub mod config;
pub mod logistic;

pub use classifier::*;
pub use config::*;
pub use logistic::*;
