use crate::buffer::NumericBuffer;
use crate::error::{LearnError, LearnResult};
use crate::shape::Shape;
use crate::vector::Vector;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops;

/// Dense `rows × cols` matrix of `f64` values.
///
/// Binary operations never broadcast: element-wise ops need identical shapes
/// and multiplication needs `self.cols() == other.rows()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    buffer: NumericBuffer,
}

// ─── Construction ───────────────────────────────────────────────────────────

impl Matrix {
    /// Zero-filled matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Matrix {
            buffer: NumericBuffer::new(rows, cols),
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix::new(rows, cols)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Matrix {
            buffer: NumericBuffer::filled(rows, cols, value),
        }
    }

    /// Build from row-major values.
    pub fn from_vec(values: Vec<f64>, rows: usize, cols: usize) -> LearnResult<Self> {
        Ok(Matrix {
            buffer: NumericBuffer::from_vec(values, rows, cols)?,
        })
    }

    /// Build from nested rows; every row must have the same length.
    pub fn from_rows(rows: &[Vec<f64>]) -> LearnResult<Self> {
        if rows.is_empty() {
            return Ok(Matrix::new(0, 0));
        }
        let cols = rows[0].len();
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(LearnError::ShapeMismatch {
                expected: vec![cols],
                got: vec![bad.len()],
            });
        }
        let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Matrix::from_vec(flat, rows.len(), cols)
    }

    /// Identity matrix of size n×n.
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::new(n, n);
        for i in 0..n {
            m.buffer.as_mut_slice()[i * n + i] = 1.0;
        }
        m
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn rows(&self) -> usize {
        self.buffer.rows()
    }

    pub fn cols(&self) -> usize {
        self.buffer.cols()
    }

    pub fn shape(&self) -> Shape {
        self.buffer.shape()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.buffer.as_slice()
    }

    pub fn buffer(&self) -> &NumericBuffer {
        &self.buffer
    }

    /// Bounds-checked read.
    pub fn at(&self, row: usize, col: usize) -> LearnResult<f64> {
        self.buffer.get(row, col)
    }

    /// Bounds-checked mutable access.
    pub fn at_mut(&mut self, row: usize, col: usize) -> LearnResult<&mut f64> {
        self.buffer.get_mut(row, col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> LearnResult<()> {
        self.buffer.set(row, col, value)
    }

    pub fn row_slice(&self, row: usize) -> LearnResult<&[f64]> {
        self.buffer.row_slice(row)
    }

    /// Copy of row `i` as a vector.
    pub fn row(&self, i: usize) -> LearnResult<Vector> {
        Ok(Vector::from_slice(self.row_slice(i)?))
    }

    /// Copy of column `j` as a vector.
    pub fn column(&self, j: usize) -> LearnResult<Vector> {
        if j >= self.cols() {
            return Err(LearnError::IndexOutOfRange {
                index: j,
                axis: 1,
                size: self.cols(),
            });
        }
        let cols = self.cols();
        let values: Vec<f64> = (0..self.rows())
            .map(|i| self.as_slice()[i * cols + j])
            .collect();
        Ok(Vector::from(values))
    }

    /// New matrix made of the given rows, in order.
    pub fn select_rows(&self, indices: &[usize]) -> LearnResult<Matrix> {
        let mut values = Vec::with_capacity(indices.len() * self.cols());
        for &i in indices {
            values.extend_from_slice(self.row_slice(i)?);
        }
        Matrix::from_vec(values, indices.len(), self.cols())
    }

    // ─── Algebra ────────────────────────────────────────────────────────────

    pub fn add(&self, other: &Matrix) -> LearnResult<Matrix> {
        Ok(Matrix {
            buffer: self.buffer.zip_with(&other.buffer, |a, b| a + b)?,
        })
    }

    pub fn subtract(&self, other: &Matrix) -> LearnResult<Matrix> {
        Ok(Matrix {
            buffer: self.buffer.zip_with(&other.buffer, |a, b| a - b)?,
        })
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        Matrix {
            buffer: self.buffer.map(|x| x * factor),
        }
    }

    /// Matrix product. Output rows are filled in parallel; each cell is
    /// accumulated sequentially over the inner dimension.
    pub fn multiply(&self, other: &Matrix) -> LearnResult<Matrix> {
        let out = self.shape().ensure_multipliable(&other.shape())?;
        let (m, n) = (out.rows(), out.cols());
        let k = self.cols();
        if m == 0 || n == 0 {
            return Ok(Matrix::new(m, n));
        }

        let a = self.as_slice();
        let b = other.as_slice();
        let mut data = vec![0.0; m * n];
        data.par_chunks_mut(n).enumerate().for_each(|(i, out_row)| {
            for (j, cell) in out_row.iter_mut().enumerate() {
                let mut sum = 0.0;
                for p in 0..k {
                    sum += a[i * k + p] * b[p * n + j];
                }
                *cell = sum;
            }
        });
        Matrix::from_vec(data, m, n)
    }

    pub fn transpose(&self) -> Matrix {
        let (rows, cols) = (self.rows(), self.cols());
        let src = self.as_slice();
        let mut out = Matrix::new(cols, rows);
        let data = out.buffer.as_mut_slice();
        for i in 0..rows {
            for j in 0..cols {
                data[j * rows + i] = src[i * cols + j];
            }
        }
        out
    }

    /// Matrix–vector product, `self · v`.
    pub fn dot_vector(&self, v: &Vector) -> LearnResult<Vector> {
        if self.cols() != v.len() {
            return Err(LearnError::ShapeMismatch {
                expected: vec![self.cols(), 1],
                got: vec![v.len(), 1],
            });
        }
        let product = self.multiply(&v.to_matrix())?;
        Ok(Vector::from(product.buffer.into_vec()))
    }
}

impl From<NumericBuffer> for Matrix {
    fn from(buffer: NumericBuffer) -> Self {
        Matrix { buffer }
    }
}

// ─── Operator Overloads ─────────────────────────────────────────────────────

impl ops::Add for &Matrix {
    type Output = LearnResult<Matrix>;
    fn add(self, rhs: Self) -> LearnResult<Matrix> {
        Matrix::add(self, rhs)
    }
}

impl ops::Sub for &Matrix {
    type Output = LearnResult<Matrix>;
    fn sub(self, rhs: Self) -> LearnResult<Matrix> {
        Matrix::subtract(self, rhs)
    }
}

impl ops::Mul for &Matrix {
    type Output = LearnResult<Matrix>;
    fn mul(self, rhs: Self) -> LearnResult<Matrix> {
        Matrix::multiply(self, rhs)
    }
}

// ─── Display ────────────────────────────────────────────────────────────────

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix [{}x{}]:", self.rows(), self.cols())?;
        let cols = self.cols();
        for i in 0..self.rows() {
            for j in 0..cols {
                write!(f, "{}\t", self.as_slice()[i * cols + j])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
