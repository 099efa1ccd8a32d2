use std::fmt;

use titan_core::{LearnResult, Matrix, Vector};

use crate::descriptive::{CentralTendency, Dispersion};

/// Descriptive statistics of one feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSummary {
    pub index: usize,
    pub count: usize,
    pub central: CentralTendency,
    pub dispersion: Dispersion,
    pub min: f64,
    pub max: f64,
}

impl FeatureSummary {
    /// Fails with `EmptyInput` when the column has no values.
    pub fn of(index: usize, column: &Vector) -> LearnResult<Self> {
        let central = CentralTendency::of(column);
        Ok(FeatureSummary {
            index,
            count: column.len(),
            central,
            dispersion: Dispersion::of(column, central.mean),
            min: column.min()?,
            max: column.max()?,
        })
    }
}

/// Per-feature report over a samples × features matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSummary {
    rows: usize,
    cols: usize,
    features: Vec<FeatureSummary>,
}

impl DataSummary {
    pub fn from_matrix(data: &Matrix) -> LearnResult<Self> {
        let features = (0..data.cols())
            .map(|j| FeatureSummary::of(j, &data.column(j)?))
            .collect::<LearnResult<Vec<_>>>()?;
        Ok(DataSummary {
            rows: data.rows(),
            cols: data.cols(),
            features,
        })
    }

    pub fn features(&self) -> &[FeatureSummary] {
        &self.features
    }

    pub fn feature(&self, index: usize) -> Option<&FeatureSummary> {
        self.features.get(index)
    }
}

impl fmt::Display for DataSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== STATISTICAL SUMMARY REPORT ==========")?;
        writeln!(f, "Dataset dimensions: {} rows x {} columns", self.rows, self.cols)?;
        writeln!(f, "================================================")?;
        for s in &self.features {
            writeln!(f)?;
            writeln!(f, "Feature {} Statistics:", s.index + 1)?;
            writeln!(f, "----------------------------------------")?;
            writeln!(f, "  Count:              {}", s.count)?;
            writeln!(f, "  Mean:               {:.4}", s.central.mean)?;
            writeln!(f, "  Median:             {:.4}", s.central.median)?;
            writeln!(f, "  Std Deviation:      {:.4}", s.dispersion.std_dev)?;
            writeln!(f, "  Variance:           {:.4}", s.dispersion.variance)?;
            writeln!(f, "  Min:                {:.4}", s.min)?;
            writeln!(f, "  Max:                {:.4}", s.max)?;
        }
        write!(f, "================================================")
    }
}
