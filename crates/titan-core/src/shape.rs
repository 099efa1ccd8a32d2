use crate::error::LearnError;
use serde::{Deserialize, Serialize};

/// The `(rows, cols)` extent of a numeric container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Shape { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.rows * self.cols
    }

    pub fn to_vec(&self) -> Vec<usize> {
        vec![self.rows, self.cols]
    }

    /// Shape with rows and columns swapped.
    pub fn transposed(&self) -> Shape {
        Shape::new(self.cols, self.rows)
    }

    /// Error unless `other` has exactly the same dimensions.
    pub fn ensure_same(&self, other: &Shape) -> Result<(), LearnError> {
        if self != other {
            return Err(LearnError::ShapeMismatch {
                expected: self.to_vec(),
                got: other.to_vec(),
            });
        }
        Ok(())
    }

    /// Error unless `self` can be multiplied on the left of `other`.
    pub fn ensure_multipliable(&self, other: &Shape) -> Result<Shape, LearnError> {
        if self.cols != other.rows {
            return Err(LearnError::ShapeMismatch {
                expected: vec![self.cols, other.cols],
                got: other.to_vec(),
            });
        }
        Ok(Shape::new(self.rows, other.cols))
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape::new(rows, cols)
    }
}
