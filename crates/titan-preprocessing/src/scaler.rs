use log::info;
use titan_core::{LearnError, LearnResult, Matrix, Vector};

/// Columns whose range is at or below this are treated as constant.
pub const MIN_RANGE: f64 = 1e-10;

/// Value assigned to every entry of a constant column.
pub const CONSTANT_FEATURE_VALUE: f64 = 0.5;

/// A feature transformation learned from data.
pub trait Scaler {
    /// Learn scaling parameters from a samples × features matrix.
    fn fit(&mut self, x: &Matrix) -> LearnResult<()>;

    /// Apply the learned parameters.
    fn transform(&self, x: &Matrix) -> LearnResult<Matrix>;

    fn fit_transform(&mut self, x: &Matrix) -> LearnResult<Matrix> {
        self.fit(x)?;
        self.transform(x)
    }
}

/// Scale features to [0, 1] range.
///
/// X_scaled = (X - X_min) / (X_max - X_min); constant columns map to 0.5.
#[derive(Debug, Clone, Default)]
pub struct MinMaxScaler {
    min: Option<Vector>,
    max: Option<Vector>,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        MinMaxScaler::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    pub fn min_values(&self) -> Option<&Vector> {
        self.min.as_ref()
    }

    pub fn max_values(&self) -> Option<&Vector> {
        self.max.as_ref()
    }
}

impl Scaler for MinMaxScaler {
    fn fit(&mut self, x: &Matrix) -> LearnResult<()> {
        if x.rows() == 0 || x.cols() == 0 {
            return Err(LearnError::EmptyInput(
                "cannot fit scaler on empty data".into(),
            ));
        }

        let mut min_vals = Vec::with_capacity(x.cols());
        let mut max_vals = Vec::with_capacity(x.cols());
        for j in 0..x.cols() {
            let column = x.column(j)?;
            min_vals.push(column.min()?);
            max_vals.push(column.max()?);
        }

        self.min = Some(Vector::from(min_vals));
        self.max = Some(Vector::from(max_vals));
        info!("min-max scaler fitted on {} features", x.cols());
        Ok(())
    }

    fn transform(&self, x: &Matrix) -> LearnResult<Matrix> {
        let (min, max) = match (&self.min, &self.max) {
            (Some(min), Some(max)) => (min, max),
            _ => {
                return Err(LearnError::NotFitted(
                    "scaler must be fitted before transform".into(),
                ))
            }
        };
        if x.cols() != min.len() {
            return Err(LearnError::DimensionMismatch(format!(
                "number of features ({}) must match fitted data ({})",
                x.cols(),
                min.len()
            )));
        }

        let mut scaled = Matrix::new(x.rows(), x.cols());
        for i in 0..x.rows() {
            for j in 0..x.cols() {
                let (lo, hi) = (min.get(j)?, max.get(j)?);
                let range = hi - lo;
                *scaled.at_mut(i, j)? = if range > MIN_RANGE {
                    (x.at(i, j)? - lo) / range
                } else {
                    CONSTANT_FEATURE_VALUE
                };
            }
        }
        Ok(scaled)
    }
}
