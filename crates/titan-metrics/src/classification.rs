use std::fmt;

use titan_core::{LearnError, LearnResult, Vector};

fn ensure_same_len(predictions: &Vector, actual: &Vector) -> LearnResult<()> {
    if predictions.len() != actual.len() {
        return Err(LearnError::DimensionMismatch(format!(
            "prediction ({}) and actual ({}) vectors must have same size",
            predictions.len(),
            actual.len()
        )));
    }
    Ok(())
}

/// Binary confusion-matrix counts.
///
/// Labels are compared with exact equality against `1.0` and `0.0`; a value
/// that is neither lands in no cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(predictions: &Vector, actual: &Vector) -> LearnResult<Self> {
        ensure_same_len(predictions, actual)?;
        let mut cm = ConfusionMatrix::default();
        for (&p, &a) in predictions.iter().zip(actual.iter()) {
            if p == 1.0 && a == 1.0 {
                cm.true_positives += 1;
            } else if p == 0.0 && a == 0.0 {
                cm.true_negatives += 1;
            } else if p == 1.0 && a == 0.0 {
                cm.false_positives += 1;
            } else if p == 0.0 && a == 1.0 {
                cm.false_negatives += 1;
            }
        }
        Ok(cm)
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// TP / (TP + FP), or `0.0` with no positive predictions.
    pub fn precision(&self) -> f64 {
        let denom = self.true_positives + self.false_positives;
        if denom == 0 {
            0.0
        } else {
            self.true_positives as f64 / denom as f64
        }
    }

    /// TP / (TP + FN), or `0.0` with no actual positives.
    pub fn recall(&self) -> f64 {
        let denom = self.true_positives + self.false_negatives;
        if denom == 0 {
            0.0
        } else {
            self.true_positives as f64 / denom as f64
        }
    }

    /// Harmonic mean of precision and recall.
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== CONFUSION MATRIX ==========")?;
        writeln!(f, "                 Predicted")?;
        writeln!(f, "               0         1")?;
        writeln!(
            f,
            "Actual  0  {:>5}  {:>5}",
            self.true_negatives, self.false_positives
        )?;
        writeln!(
            f,
            "        1  {:>5}  {:>5}",
            self.false_negatives, self.true_positives
        )?;
        writeln!(f, "======================================")?;
        writeln!(f, "True Positives:  {}", self.true_positives)?;
        writeln!(f, "True Negatives:  {}", self.true_negatives)?;
        writeln!(f, "False Positives: {}", self.false_positives)?;
        writeln!(f, "False Negatives: {}", self.false_negatives)?;
        write!(f, "======================================")
    }
}

/// Fraction of exactly matching predictions; `0.0` for empty input.
pub fn accuracy(predictions: &Vector, actual: &Vector) -> LearnResult<f64> {
    ensure_same_len(predictions, actual)?;
    let n = predictions.len();
    if n == 0 {
        return Ok(0.0);
    }
    let correct = predictions
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();
    Ok(correct as f64 / n as f64)
}

pub fn precision(predictions: &Vector, actual: &Vector) -> LearnResult<f64> {
    Ok(ConfusionMatrix::from_predictions(predictions, actual)?.precision())
}

pub fn recall(predictions: &Vector, actual: &Vector) -> LearnResult<f64> {
    Ok(ConfusionMatrix::from_predictions(predictions, actual)?.recall())
}

pub fn f1_score(predictions: &Vector, actual: &Vector) -> LearnResult<f64> {
    Ok(ConfusionMatrix::from_predictions(predictions, actual)?.f1_score())
}
