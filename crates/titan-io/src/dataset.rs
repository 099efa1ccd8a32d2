use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, warn};
use titan_core::{Matrix, Vector};

use crate::error::{IoError, IoResult};

/// A labelled numeric dataset: every column but the last is a feature, the
/// last column is the label.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Matrix,
    labels: Vector,
    feature_names: Vec<String>,
    label_name: String,
}

impl Dataset {
    /// Read a CSV file with a header row.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        let dataset = Self::from_reader(File::open(path)?)?;
        info!(
            "loaded {} samples with {} features from {}",
            dataset.n_samples(),
            dataset.n_features(),
            path.display()
        );
        Ok(dataset)
    }

    /// Read CSV text with a header row from any source.
    pub fn from_reader<R: Read>(reader: R) -> IoResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut names: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let width = names.len();

        let mut values = Vec::new();
        let mut labels = Vec::new();
        let mut n_rows = 0usize;

        for result in rdr.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());

            if record.iter().all(str::is_empty) {
                warn!("skipping empty record at line {}", line);
                continue;
            }
            if record.len() != width {
                return Err(IoError::RaggedRecord {
                    line,
                    expected: width,
                    got: record.len(),
                });
            }

            for (j, field) in record.iter().enumerate() {
                let value: f64 = field.parse().map_err(|_| IoError::Parse {
                    line,
                    value: field.to_string(),
                })?;
                if j + 1 == width {
                    labels.push(value);
                } else {
                    values.push(value);
                }
            }
            n_rows += 1;
        }

        if n_rows == 0 || width == 0 {
            return Err(IoError::EmptyDataset);
        }

        let label_name = names.pop().unwrap_or_default();
        Ok(Dataset {
            features: Matrix::from_vec(values, n_rows, width - 1)?,
            labels: Vector::from(labels),
            feature_names: names,
            label_name,
        })
    }

    pub fn features(&self) -> &Matrix {
        &self.features
    }

    pub fn labels(&self) -> &Vector {
        &self.labels
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn label_name(&self) -> &str {
        &self.label_name
    }

    pub fn n_samples(&self) -> usize {
        self.features.rows()
    }

    pub fn n_features(&self) -> usize {
        self.features.cols()
    }

    /// The first `n` rows (fewer if the dataset is smaller).
    pub fn head(&self, n: usize) -> IoResult<Dataset> {
        let indices: Vec<usize> = (0..n.min(self.n_samples())).collect();
        let labels = indices
            .iter()
            .map(|&i| self.labels.get(i))
            .collect::<Result<Vec<f64>, _>>()?;
        Ok(Dataset {
            features: self.features.select_rows(&indices)?,
            labels: Vector::from(labels),
            feature_names: self.feature_names.clone(),
            label_name: self.label_name.clone(),
        })
    }

    /// Split into owned features and labels.
    pub fn into_parts(self) -> (Matrix, Vector) {
        (self.features, self.labels)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.feature_names {
            write!(f, "{}\t", name)?;
        }
        writeln!(f, "{}", self.label_name)?;
        for (i, label) in self.labels.iter().enumerate() {
            if let Ok(row) = self.features.row_slice(i) {
                for v in row {
                    write!(f, "{}\t", v)?;
                }
            }
            writeln!(f, "{}", label)?;
        }
        Ok(())
    }
}
