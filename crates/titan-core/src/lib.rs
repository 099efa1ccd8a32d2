//! Dense numeric containers for Titan-Learn.
//!
//! [`NumericBuffer`] owns the storage; [`Matrix`] and [`Vector`] wrap it by
//! composition and add algebra and reductions on top.

pub mod buffer;
pub mod error;
pub mod matrix;
pub mod shape;
pub mod vector;

pub use buffer::NumericBuffer;
pub use error::{LearnError, LearnResult};
pub use matrix::Matrix;
pub use shape::Shape;
pub use vector::Vector;
