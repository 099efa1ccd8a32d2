use crate::buffer::NumericBuffer;
use crate::error::{LearnError, LearnResult};
use crate::matrix::Matrix;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column vector: a single-column [`NumericBuffer`] with reductions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVector")]
pub struct Vector {
    buffer: NumericBuffer,
}

#[derive(Deserialize)]
struct RawVector {
    buffer: NumericBuffer,
}

impl TryFrom<RawVector> for Vector {
    type Error = LearnError;

    fn try_from(raw: RawVector) -> LearnResult<Self> {
        if raw.buffer.cols() != 1 {
            return Err(LearnError::ShapeMismatch {
                expected: vec![raw.buffer.rows(), 1],
                got: raw.buffer.shape().to_vec(),
            });
        }
        Ok(Vector { buffer: raw.buffer })
    }
}

impl Vector {
    /// Zero-filled vector of `size` elements.
    pub fn new(size: usize) -> Self {
        Vector {
            buffer: NumericBuffer::new(size, 1),
        }
    }

    pub fn filled(size: usize, value: f64) -> Self {
        Vector {
            buffer: NumericBuffer::filled(size, 1, value),
        }
    }

    pub fn from_slice(values: &[f64]) -> Self {
        Vector::from(values.to_vec())
    }

    pub fn len(&self) -> usize {
        self.buffer.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[f64] {
        self.buffer.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.buffer.as_mut_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.as_slice().iter()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.buffer.into_vec()
    }

    fn check_index(&self, index: usize) -> LearnResult<()> {
        if index >= self.len() {
            return Err(LearnError::IndexOutOfRange {
                index,
                axis: 0,
                size: self.len(),
            });
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> LearnResult<f64> {
        self.check_index(index)?;
        Ok(self.as_slice()[index])
    }

    pub fn get_mut(&mut self, index: usize) -> LearnResult<&mut f64> {
        self.check_index(index)?;
        Ok(&mut self.as_mut_slice()[index])
    }

    pub fn set(&mut self, index: usize, value: f64) -> LearnResult<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Copy as an `n × 1` matrix.
    pub fn to_matrix(&self) -> Matrix {
        Matrix::from(self.buffer.clone())
    }

    // ─── Reductions ─────────────────────────────────────────────────────────

    /// Sum accumulated left to right.
    pub fn sum(&self) -> f64 {
        self.iter().fold(0.0, |acc, &x| acc + x)
    }

    /// Arithmetic mean; `0.0` for an empty vector.
    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.sum() / self.len() as f64
    }

    pub fn max(&self) -> LearnResult<f64> {
        self.iter()
            .copied()
            .reduce(|a, b| if b > a { b } else { a })
            .ok_or_else(|| LearnError::EmptyInput("cannot find max of empty vector".into()))
    }

    pub fn min(&self) -> LearnResult<f64> {
        self.iter()
            .copied()
            .reduce(|a, b| if b < a { b } else { a })
            .ok_or_else(|| LearnError::EmptyInput("cannot find min of empty vector".into()))
    }

    /// Dot product with an equally sized vector.
    pub fn dot(&self, other: &Vector) -> LearnResult<f64> {
        if self.len() != other.len() {
            return Err(LearnError::ShapeMismatch {
                expected: vec![self.len(), 1],
                got: vec![other.len(), 1],
            });
        }
        Ok(self
            .iter()
            .zip(other.iter())
            .fold(0.0, |acc, (&a, &b)| acc + a * b))
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Vector {
            buffer: NumericBuffer::column(values),
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vector [{}]:", self.len())?;
        for v in self.iter() {
            write!(f, "{} ", v)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deserialize_rejects_inconsistent_storage() {
        let short = serde_json::from_str::<Vector>(
            r#"{"buffer":{"values":[1.0],"shape":{"rows":3,"cols":1}}}"#,
        );
        assert!(short.is_err());

        let wide = serde_json::from_str::<Vector>(
            r#"{"buffer":{"values":[1.0,2.0],"shape":{"rows":1,"cols":2}}}"#,
        );
        assert!(wide.is_err());

        let v: Vector = serde_json::from_str(
            r#"{"buffer":{"values":[1.0,2.0,3.0],"shape":{"rows":3,"cols":1}}}"#,
        )
        .unwrap();
        assert_eq!(v.get(2).unwrap(), 3.0);
        assert!(matches!(v.get(3), Err(LearnError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_creation() {
        let v = Vector::new(3);
        assert_eq!(v.len(), 3);
        assert_eq!(v.as_slice(), &[0.0, 0.0, 0.0]);

        let f = Vector::filled(2, 7.5);
        assert_eq!(f.as_slice(), &[7.5, 7.5]);
        assert!(Vector::new(0).is_empty());
    }

    #[test]
    fn test_reductions() {
        let v = Vector::from_slice(&[3.0, -1.0, 4.0, 1.5]);
        assert_relative_eq!(v.sum(), 7.5);
        assert_relative_eq!(v.mean(), 1.875);
        assert_eq!(v.max().unwrap(), 4.0);
        assert_eq!(v.min().unwrap(), -1.0);
    }

    #[test]
    fn test_min_mean_max_ordering() {
        let samples: [&[f64]; 4] = [
            &[1.0],
            &[2.0, 2.0, 2.0],
            &[-5.0, 10.0, 0.25],
            &[1e-9, 3e9, -2.5, 0.0, 17.0],
        ];
        for s in samples {
            let v = Vector::from_slice(s);
            let (lo, mean, hi) = (v.min().unwrap(), v.mean(), v.max().unwrap());
            assert!(lo <= mean && mean <= hi, "{lo} <= {mean} <= {hi}");
        }
    }

    #[test]
    fn test_empty_reductions() {
        let v = Vector::new(0);
        assert_eq!(v.sum(), 0.0);
        assert_eq!(v.mean(), 0.0);
        assert!(matches!(v.max(), Err(LearnError::EmptyInput(_))));
        assert!(matches!(v.min(), Err(LearnError::EmptyInput(_))));
    }

    #[test]
    fn test_index_out_of_range() {
        let mut v = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(v.get(2).unwrap(), 3.0);
        assert_eq!(
            v.get(3),
            Err(LearnError::IndexOutOfRange { index: 3, axis: 0, size: 3 })
        );
        // -1 wrapped into usize
        assert!(matches!(
            v.get(usize::MAX),
            Err(LearnError::IndexOutOfRange { .. })
        ));
        assert!(v.set(3, 0.0).is_err());
        v.set(0, 9.0).unwrap();
        assert_eq!(v.get(0).unwrap(), 9.0);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Vector::from_slice(&[1.0, 2.0]);
        let mut copy = original.clone();
        *copy.get_mut(1).unwrap() = 5.0;
        assert_eq!(original.as_slice(), &[1.0, 2.0]);
        assert_eq!(copy.as_slice(), &[1.0, 5.0]);
    }

    #[test]
    fn test_dot_and_matrix() {
        let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
        assert_eq!(a.dot(&b).unwrap(), 32.0);
        assert!(a.dot(&Vector::new(2)).is_err());

        let m = a.to_matrix();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 1);
    }

    #[test]
    fn test_display() {
        let v = Vector::from_slice(&[1.0, 2.5]);
        assert_eq!(v.to_string(), "Vector [2]:\n1 2.5 \n");
    }
}
