use std::fmt;

use titan_core::{LearnResult, Vector};
use titan_linear::LogisticRegression;

use crate::classification::ConfusionMatrix;

/// Accuracy, precision, recall and F1 of one set of predictions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub confusion: ConfusionMatrix,
}

impl ClassificationReport {
    pub fn new(predictions: &Vector, actual: &Vector) -> LearnResult<Self> {
        let confusion = ConfusionMatrix::from_predictions(predictions, actual)?;
        Ok(ClassificationReport {
            accuracy: crate::classification::accuracy(predictions, actual)?,
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1_score: confusion.f1_score(),
            confusion,
        })
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== MODEL PERFORMANCE METRICS ==========")?;
        writeln!(f, "Accuracy:  {:.4}%", self.accuracy * 100.0)?;
        writeln!(f, "Precision: {:.4}%", self.precision * 100.0)?;
        writeln!(f, "Recall:    {:.4}%", self.recall * 100.0)?;
        writeln!(f, "F1 Score:  {:.4}%", self.f1_score * 100.0)?;
        write!(f, "===============================================")
    }
}

/// Snapshot of a model's public parameters for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReport {
    pub is_trained: bool,
    pub learning_rate: f64,
    pub epochs: usize,
    pub bias: f64,
    pub weights: Vec<f64>,
}

impl ModelReport {
    pub fn of(model: &LogisticRegression) -> Self {
        ModelReport {
            is_trained: model.is_trained(),
            learning_rate: model.learning_rate(),
            epochs: model.epochs(),
            bias: model.bias(),
            weights: model.weights().as_slice().to_vec(),
        }
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== MODEL ANALYSIS ==========")?;
        if self.is_trained {
            writeln!(f, "Model Status: Trained")?;
            writeln!(f, "Learning Rate: {}", self.learning_rate)?;
            writeln!(f, "Training Epochs: {}", self.epochs)?;
            writeln!(f, "Bias: {}", self.bias)?;
            writeln!(f)?;
            writeln!(f, "Feature Weights:")?;
            for (i, w) in self.weights.iter().enumerate() {
                writeln!(f, "  Weight {}: {:.4}", i + 1, w)?;
            }
        } else {
            writeln!(f, "Model Status: Not Trained")?;
        }
        write!(f, "====================================")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use titan_core::Matrix;

    #[test]
    fn test_classification_report() {
        let pred = Vector::from_slice(&[1.0, 1.0, 0.0, 0.0]);
        let actual = Vector::from_slice(&[1.0, 0.0, 0.0, 0.0]);
        let report = ClassificationReport::new(&pred, &actual).unwrap();
        assert_eq!(report.accuracy, 0.75);
        assert_eq!(report.precision, 0.5);
        assert_eq!(report.recall, 1.0);
        assert_eq!(report.confusion.false_positives, 1);
        assert!(report.to_string().contains("Accuracy:  75.0000%"));
    }

    #[test]
    fn test_untrained_model_report() {
        let report = ModelReport::of(&LogisticRegression::default());
        assert!(!report.is_trained);
        assert!(report.weights.is_empty());
        assert!(report.to_string().contains("Model Status: Not Trained"));
    }

    #[test]
    fn test_trained_model_report() {
        let x = Matrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let y = Vector::from_slice(&[0.0, 1.0]);
        let mut model = LogisticRegression::new(0.5, 50);
        model.train(&x, &y).unwrap();

        let report = ModelReport::of(&model);
        assert!(report.is_trained);
        assert_eq!(report.epochs, 50);
        assert_eq!(report.weights.len(), 2);
        let text = report.to_string();
        assert!(text.contains("Weight 2:"));
        assert!(text.contains("Training Epochs: 50"));
    }
}
