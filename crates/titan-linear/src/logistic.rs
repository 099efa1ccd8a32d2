use crate::classifier::Classifier;
use crate::config::TrainerConfig;

use log::{debug, info};
use titan_core::{LearnError, LearnResult, Matrix, Vector};

/// Scores are clamped to `[-SIGMOID_CLAMP, SIGMOID_CLAMP]` before `exp`.
pub const SIGMOID_CLAMP: f64 = 500.0;

/// Probabilities are clamped to `[LOSS_EPSILON, 1 - LOSS_EPSILON]` before `ln`.
pub const LOSS_EPSILON: f64 = 1e-7;

/// Diagnostic loss is recorded on the first epoch and every `LOSS_INTERVAL` epochs.
pub const LOSS_INTERVAL: usize = 100;

/// Logistic function with overflow-safe clamping of the input.
pub fn sigmoid(z: f64) -> f64 {
    let z = z.clamp(-SIGMOID_CLAMP, SIGMOID_CLAMP);
    1.0 / (1.0 + (-z).exp())
}

/// Mean binary cross-entropy of `probabilities` against `labels`.
///
/// L = -mean(y * log(p) + (1-y) * log(1-p)), with `p` clamped away from 0 and 1.
/// Returns `0.0` for empty input.
pub fn binary_cross_entropy(probabilities: &[f64], labels: &[f64]) -> f64 {
    let n = probabilities.len().min(labels.len());
    if n == 0 {
        return 0.0;
    }
    let total = probabilities
        .iter()
        .zip(labels.iter())
        .fold(0.0, |acc, (&p, &y)| {
            let p = p.clamp(LOSS_EPSILON, 1.0 - LOSS_EPSILON);
            acc + y * p.ln() + (1.0 - y) * (1.0 - p).ln()
        });
    -total / n as f64
}

/// Loss of the probabilities from a given (1-based) epoch's forward pass,
/// taken before that epoch's parameter update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossCheckpoint {
    pub epoch: usize,
    pub loss: f64,
}

/// Diagnostic loss trail of the most recent training run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingHistory {
    checkpoints: Vec<LossCheckpoint>,
}

impl TrainingHistory {
    fn record(&mut self, epoch: usize, loss: f64) {
        self.checkpoints.push(LossCheckpoint { epoch, loss });
    }

    pub fn checkpoints(&self) -> &[LossCheckpoint] {
        &self.checkpoints
    }

    pub fn last_loss(&self) -> Option<f64> {
        self.checkpoints.last().map(|c| c.loss)
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}

/// Linear score of every row of `x`, accumulated as `bias + w[0]*x[0] + w[1]*x[1] + ...`
/// from left to right.
fn linear_scores(x: &Matrix, weights: &Vector, bias: f64) -> LearnResult<Vec<f64>> {
    (0..x.rows())
        .map(|i| {
            let row = x.row_slice(i)?;
            Ok(row
                .iter()
                .zip(weights.iter())
                .fold(bias, |z, (&xij, &w)| z + w * xij))
        })
        .collect()
}

/// Logistic Regression for binary classification, trained by full-batch gradient descent.
///
/// Training always runs exactly `epochs` iterations; the recorded loss is for
/// diagnostics only and never stops the loop early.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    weights: Vector,
    bias: f64,
    learning_rate: f64,
    epochs: usize,
    is_trained: bool,
    history: TrainingHistory,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        LogisticRegression::from(TrainerConfig::default())
    }
}

impl From<TrainerConfig> for LogisticRegression {
    fn from(config: TrainerConfig) -> Self {
        LogisticRegression::new(config.learning_rate, config.epochs)
    }
}

impl LogisticRegression {
    pub fn new(learning_rate: f64, epochs: usize) -> Self {
        LogisticRegression {
            weights: Vector::new(0),
            bias: 0.0,
            learning_rate,
            epochs,
            is_trained: false,
            history: TrainingHistory::default(),
        }
    }

    /// Build a trainer from a validated configuration.
    pub fn from_config(config: &TrainerConfig) -> LearnResult<Self> {
        config.validate()?;
        Ok(LogisticRegression::from(*config))
    }

    /// Fit weights and bias from scratch on `x` (samples × features) and `y`.
    pub fn train(&mut self, x: &Matrix, y: &Vector) -> LearnResult<()> {
        let n = x.rows();
        let p = x.cols();
        if n != y.len() {
            return Err(LearnError::DimensionMismatch(format!(
                "number of samples ({}) must match number of labels ({})",
                n,
                y.len()
            )));
        }

        info!(
            "training logistic regression: samples={} features={} learning_rate={} epochs={}",
            n, p, self.learning_rate, self.epochs
        );

        let xt = x.transpose();
        let n_t = n as f64;
        let mut weights = Vector::new(p);
        let mut bias = 0.0;
        let mut history = TrainingHistory::default();

        for epoch in 0..self.epochs {
            // Forward pass over every sample before any update.
            let probabilities: Vec<f64> = linear_scores(x, &weights, bias)?
                .into_iter()
                .map(sigmoid)
                .collect();

            let errors: Vec<f64> = probabilities
                .iter()
                .zip(y.iter())
                .map(|(&prob, &label)| prob - label)
                .collect();
            let errors = Vector::from(errors);
            let db = errors.sum();
            let dw = xt.dot_vector(&errors)?;

            if n > 0 {
                for (w, &g) in weights.as_mut_slice().iter_mut().zip(dw.iter()) {
                    *w -= self.learning_rate * (g / n_t);
                }
                bias -= self.learning_rate * (db / n_t);
            }

            if epoch == 0 || (epoch + 1) % LOSS_INTERVAL == 0 {
                let loss = binary_cross_entropy(&probabilities, y.as_slice());
                debug!("epoch {:>4} - loss: {:.4}", epoch + 1, loss);
                history.record(epoch + 1, loss);
            }
        }

        self.weights = weights;
        self.bias = bias;
        self.history = history;
        self.is_trained = true;
        info!(
            "training completed: bias={:.4} final_loss={:?}",
            self.bias,
            self.history.last_loss()
        );
        Ok(())
    }

    /// Predict probabilities of the positive class.
    pub fn predict_proba(&self, x: &Matrix) -> LearnResult<Vector> {
        if !self.is_trained {
            return Err(LearnError::NotTrained);
        }
        if x.cols() != self.weights.len() {
            return Err(LearnError::DimensionMismatch(format!(
                "number of features ({}) must match trained model ({})",
                x.cols(),
                self.weights.len()
            )));
        }
        let proba: Vec<f64> = linear_scores(x, &self.weights, self.bias)?
            .into_iter()
            .map(sigmoid)
            .collect();
        Ok(Vector::from(proba))
    }

    /// Predict class labels (threshold = 0.5), emitting exactly `0.0` or `1.0`.
    pub fn predict(&self, x: &Matrix) -> LearnResult<Vector> {
        let proba = self.predict_proba(x)?;
        let labels: Vec<f64> = proba
            .iter()
            .map(|&p| if p >= 0.5 { 1.0 } else { 0.0 })
            .collect();
        Ok(Vector::from(labels))
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn weights(&self) -> &Vector {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn epochs(&self) -> usize {
        self.epochs
    }

    pub fn is_trained(&self) -> bool {
        self.is_trained
    }

    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    pub fn set_epochs(&mut self, epochs: usize) {
        self.epochs = epochs;
    }

    /// Rebuild a trained model from stored parameters.
    pub fn from_parameters(
        weights: Vector,
        bias: f64,
        learning_rate: f64,
        epochs: usize,
    ) -> Self {
        LogisticRegression {
            weights,
            bias,
            learning_rate,
            epochs,
            is_trained: true,
            history: TrainingHistory::default(),
        }
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &str {
        "Logistic Regression"
    }

    fn train(&mut self, x: &Matrix, y: &Vector) -> LearnResult<()> {
        LogisticRegression::train(self, x, y)
    }

    fn predict(&self, x: &Matrix) -> LearnResult<Vector> {
        LogisticRegression::predict(self, x)
    }

    fn predict_proba(&self, x: &Matrix) -> LearnResult<Vector> {
        LogisticRegression::predict_proba(self, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn training_accuracy(pred: &Vector, y: &Vector) -> f64 {
        let correct = pred.iter().zip(y.iter()).filter(|(a, b)| a == b).count();
        correct as f64 / y.len() as f64
    }

    #[test]
    fn test_logistic_regression() {
        // Linearly separable data
        let x = Matrix::from_rows(&[
            vec![0.0, 0.0],
            vec![0.5, 0.5],
            vec![1.0, 1.0],
            vec![5.0, 5.0],
            vec![5.5, 5.5],
            vec![6.0, 6.0],
        ])
        .unwrap();
        let y = Vector::from_slice(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);

        let mut model = LogisticRegression::new(0.1, 1000);
        model.train(&x, &y).unwrap();

        let pred = model.predict(&x).unwrap();
        assert_eq!(pred.as_slice(), y.as_slice());
        assert!(model.is_trained());
        assert_eq!(model.weights().len(), 2);
    }

    #[test]
    fn test_single_feature_separable() {
        // (0,0)->0, (0,1)->0, (1,0)->1, (1,1)->1 using x1 alone
        let x = Matrix::from_rows(&[vec![0.0], vec![0.0], vec![1.0], vec![1.0]]).unwrap();
        let y = Vector::from_slice(&[0.0, 0.0, 1.0, 1.0]);

        let mut model = LogisticRegression::new(0.5, 2000);
        model.train(&x, &y).unwrap();

        let pred = model.predict(&x).unwrap();
        assert!(training_accuracy(&pred, &y) >= 0.75);
        assert!(model.weights().get(0).unwrap() > 0.0);
        assert!(model.bias() < 0.0);
    }

    #[test]
    fn test_defaults() {
        let model = LogisticRegression::default();
        assert_eq!(model.learning_rate(), 0.01);
        assert_eq!(model.epochs(), 1000);
        assert!(!model.is_trained());
        assert_eq!(model.bias(), 0.0);
    }

    #[test]
    fn test_predict_before_train() {
        let model = LogisticRegression::default();
        let x = Matrix::new(2, 2);
        assert_eq!(model.predict(&x), Err(LearnError::NotTrained));
        assert_eq!(model.predict_proba(&x), Err(LearnError::NotTrained));
    }

    #[test]
    fn test_train_dimension_mismatch() {
        let mut model = LogisticRegression::default();
        let x = Matrix::new(3, 2);
        let y = Vector::new(4);
        assert!(matches!(
            model.train(&x, &y),
            Err(LearnError::DimensionMismatch(_))
        ));
        assert!(!model.is_trained());
    }

    #[test]
    fn test_predict_feature_mismatch() {
        let x = Matrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let y = Vector::from_slice(&[0.0, 1.0]);
        let mut model = LogisticRegression::new(0.1, 10);
        model.train(&x, &y).unwrap();

        let wrong = Matrix::new(2, 3);
        assert!(matches!(
            model.predict(&wrong),
            Err(LearnError::DimensionMismatch(_))
        ));
        assert!(matches!(
            model.predict_proba(&wrong),
            Err(LearnError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_single_epoch_update() {
        // With zero init every p_i = 0.5, so one step is easy to compute by hand.
        let x = Matrix::from_rows(&[vec![1.0], vec![3.0]]).unwrap();
        let y = Vector::from_slice(&[1.0, 0.0]);
        let mut model = LogisticRegression::new(0.1, 1);
        model.train(&x, &y).unwrap();

        // dw = (-0.5 * 1 + 0.5 * 3) = 1.0, db = 0.0
        assert_abs_diff_eq!(model.weights().get(0).unwrap(), -0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(model.bias(), 0.0, epsilon = 1e-12);
        assert_eq!(model.history().checkpoints().len(), 1);
        assert_abs_diff_eq!(
            model.history().last_loss().unwrap(),
            std::f64::consts::LN_2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_retrain_restarts_from_zero() {
        let x = Matrix::from_rows(&[vec![0.0], vec![1.0], vec![2.0], vec![3.0]]).unwrap();
        let y = Vector::from_slice(&[0.0, 0.0, 1.0, 1.0]);

        let mut model = LogisticRegression::new(0.3, 200);
        model.train(&x, &y).unwrap();
        let first = (model.weights().clone(), model.bias());

        model.train(&x, &y).unwrap();
        assert_eq!(model.weights(), &first.0);
        assert_eq!(model.bias(), first.1);
    }

    #[test]
    fn test_loss_checkpoints() {
        let x = Matrix::from_rows(&[vec![0.0], vec![1.0]]).unwrap();
        let y = Vector::from_slice(&[0.0, 1.0]);
        let mut model = LogisticRegression::new(0.5, 250);
        model.train(&x, &y).unwrap();

        let epochs: Vec<usize> = model.history().checkpoints().iter().map(|c| c.epoch).collect();
        assert_eq!(epochs, vec![1, 100, 200]);
        let losses: Vec<f64> = model.history().checkpoints().iter().map(|c| c.loss).collect();
        assert!(losses.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_proba_and_labels_agree() {
        let x = Matrix::from_rows(&[vec![-2.0], vec![-1.0], vec![1.0], vec![2.0]]).unwrap();
        let y = Vector::from_slice(&[0.0, 0.0, 1.0, 1.0]);
        let mut model = LogisticRegression::new(0.5, 300);
        model.train(&x, &y).unwrap();

        let proba = model.predict_proba(&x).unwrap();
        let labels = model.predict(&x).unwrap();
        for (p, l) in proba.iter().zip(labels.iter()) {
            assert!(*p > 0.0 && *p < 1.0);
            assert_eq!(*l, if *p >= 0.5 { 1.0 } else { 0.0 });
        }
    }

    #[test]
    fn test_empty_training_set() {
        let mut model = LogisticRegression::new(0.1, 5);
        model.train(&Matrix::new(0, 3), &Vector::new(0)).unwrap();
        assert!(model.is_trained());
        assert_eq!(model.weights().as_slice(), &[0.0, 0.0, 0.0]);
        assert_eq!(model.bias(), 0.0);
    }

    #[test]
    fn test_score_accumulates_from_bias() {
        // 1 + 1e16 rounds to 1e16, so starting from the bias cancels it out.
        let model = LogisticRegression::from_parameters(
            Vector::from_slice(&[1e16, -1e16]),
            1.0,
            0.1,
            10,
        );
        let x = Matrix::from_rows(&[vec![1.0, 1.0]]).unwrap();
        assert_eq!(model.predict_proba(&x).unwrap().as_slice(), &[0.5]);
    }

    #[test]
    fn test_sigmoid_clamped() {
        assert_abs_diff_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid(1e6), sigmoid(SIGMOID_CLAMP));
        assert_eq!(sigmoid(-1e6), sigmoid(-SIGMOID_CLAMP));
        assert!(sigmoid(-1e6) > 0.0);
        assert!(sigmoid(-1e6).is_finite());
    }

    #[test]
    fn test_binary_cross_entropy() {
        assert_eq!(binary_cross_entropy(&[], &[]), 0.0);
        let perfect = binary_cross_entropy(&[1.0, 0.0], &[1.0, 0.0]);
        assert!(perfect.is_finite());
        assert!(perfect < 1e-6);
        assert_abs_diff_eq!(
            binary_cross_entropy(&[0.5, 0.5], &[0.0, 1.0]),
            std::f64::consts::LN_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_via_trait_object() {
        let x = Matrix::from_rows(&[vec![0.0], vec![4.0]]).unwrap();
        let y = Vector::from_slice(&[0.0, 1.0]);
        let mut model: Box<dyn Classifier> = Box::new(LogisticRegression::new(0.5, 100));
        model.train(&x, &y).unwrap();
        assert_eq!(model.predict(&x).unwrap().as_slice(), &[0.0, 1.0]);
        assert_eq!(model.name(), "Logistic Regression");
    }
}
