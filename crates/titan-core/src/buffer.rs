use crate::error::{LearnError, LearnResult};
use crate::shape::Shape;

use serde::{Deserialize, Serialize};

/// Owned 2-D storage of `f64` values backing [`Matrix`] and [`Vector`].
///
/// Values live in one contiguous `Vec<f64>` in row-major order. `Clone`
/// duplicates the whole allocation, so two buffers never share storage.
///
/// [`Matrix`]: crate::Matrix
/// [`Vector`]: crate::Vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBuffer")]
pub struct NumericBuffer {
    values: Vec<f64>,
    shape: Shape,
}

/// Unchecked wire form; deserialization goes through [`NumericBuffer::from_vec`].
#[derive(Deserialize)]
struct RawBuffer {
    values: Vec<f64>,
    shape: Shape,
}

impl TryFrom<RawBuffer> for NumericBuffer {
    type Error = LearnError;

    fn try_from(raw: RawBuffer) -> LearnResult<Self> {
        NumericBuffer::from_vec(raw.values, raw.shape.rows(), raw.shape.cols())
    }
}

impl NumericBuffer {
    /// Allocate a `rows × cols` buffer filled with zeros.
    pub fn new(rows: usize, cols: usize) -> Self {
        NumericBuffer::filled(rows, cols, 0.0)
    }

    /// Allocate a `rows × cols` buffer filled with `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        let shape = Shape::new(rows, cols);
        NumericBuffer {
            values: vec![value; shape.numel()],
            shape,
        }
    }

    /// Wrap row-major values, checking the length against the shape.
    pub fn from_vec(values: Vec<f64>, rows: usize, cols: usize) -> LearnResult<Self> {
        let shape = Shape::new(rows, cols);
        if values.len() != shape.numel() {
            return Err(LearnError::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![values.len()],
            });
        }
        Ok(NumericBuffer { values, shape })
    }

    /// Single-column buffer holding `values`.
    pub fn column(values: Vec<f64>) -> Self {
        let shape = Shape::new(values.len(), 1);
        NumericBuffer { values, shape }
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn numel(&self) -> usize {
        self.values.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    fn offset(&self, row: usize, col: usize) -> LearnResult<usize> {
        if row >= self.rows() {
            return Err(LearnError::IndexOutOfRange {
                index: row,
                axis: 0,
                size: self.rows(),
            });
        }
        if col >= self.cols() {
            return Err(LearnError::IndexOutOfRange {
                index: col,
                axis: 1,
                size: self.cols(),
            });
        }
        Ok(row * self.cols() + col)
    }

    pub fn get(&self, row: usize, col: usize) -> LearnResult<f64> {
        let offset = self.offset(row, col)?;
        Ok(self.values[offset])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> LearnResult<&mut f64> {
        let offset = self.offset(row, col)?;
        Ok(&mut self.values[offset])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> LearnResult<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    /// Contiguous view of one row.
    pub fn row_slice(&self, row: usize) -> LearnResult<&[f64]> {
        if row >= self.rows() {
            return Err(LearnError::IndexOutOfRange {
                index: row,
                axis: 0,
                size: self.rows(),
            });
        }
        let start = row * self.cols();
        Ok(&self.values[start..start + self.cols()])
    }

    /// Element-wise combination of two equally shaped buffers.
    pub fn zip_with<F: Fn(f64, f64) -> f64>(
        &self,
        other: &NumericBuffer,
        op: F,
    ) -> LearnResult<NumericBuffer> {
        self.shape.ensure_same(&other.shape)?;
        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(NumericBuffer {
            values,
            shape: self.shape,
        })
    }

    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> NumericBuffer {
        NumericBuffer {
            values: self.values.iter().map(|&x| f(x)).collect(),
            shape: self.shape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_checks_length() {
        let ok: NumericBuffer =
            serde_json::from_str(r#"{"values":[1.0,2.0],"shape":{"rows":1,"cols":2}}"#).unwrap();
        assert_eq!(ok.get(0, 1).unwrap(), 2.0);

        let short = serde_json::from_str::<NumericBuffer>(
            r#"{"values":[1.0],"shape":{"rows":3,"cols":1}}"#,
        );
        assert!(short.is_err());
    }

    #[test]
    fn test_zero_initialized() {
        let b = NumericBuffer::new(3, 2);
        assert_eq!(b.rows(), 3);
        assert_eq!(b.cols(), 2);
        assert_eq!(b.numel(), 6);
        assert!(b.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_get_set() {
        let mut b = NumericBuffer::new(2, 2);
        b.set(1, 0, 4.5).unwrap();
        assert_eq!(b.get(1, 0).unwrap(), 4.5);
        *b.get_mut(0, 1).unwrap() = -1.0;
        assert_eq!(b.as_slice(), &[0.0, -1.0, 4.5, 0.0]);
    }

    #[test]
    fn test_out_of_range() {
        let mut b = NumericBuffer::new(2, 3);
        assert_eq!(
            b.get(2, 0),
            Err(LearnError::IndexOutOfRange { index: 2, axis: 0, size: 2 })
        );
        assert_eq!(
            b.set(0, 3, 1.0),
            Err(LearnError::IndexOutOfRange { index: 3, axis: 1, size: 3 })
        );
        assert!(b.row_slice(5).is_err());
    }

    #[test]
    fn test_from_vec_length_checked() {
        assert!(NumericBuffer::from_vec(vec![1.0, 2.0, 3.0], 2, 2).is_err());
        let b = NumericBuffer::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        assert_eq!(b.row_slice(1).unwrap(), &[3.0, 4.0]);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = NumericBuffer::filled(2, 2, 1.0);
        let mut copy = original.clone();
        copy.set(0, 0, 9.0).unwrap();
        assert_eq!(original.get(0, 0).unwrap(), 1.0);
        assert_ne!(original.as_slice().as_ptr(), copy.as_slice().as_ptr());
    }

    #[test]
    fn test_reassignment_takes_source_dimensions() {
        let mut target = NumericBuffer::new(1, 1);
        assert_eq!(target.numel(), 1);
        let source = NumericBuffer::filled(3, 4, 2.0);
        target = source.clone();
        assert_eq!(target.shape(), Shape::new(3, 4));
        assert_eq!(target, source);
    }
}
