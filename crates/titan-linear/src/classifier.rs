use titan_core::{LearnResult, Matrix, Vector};

/// A supervised binary classifier.
///
/// Callers that only need to fit and score hold a `Box<dyn Classifier>`
/// rather than a concrete model type.
pub trait Classifier {
    fn name(&self) -> &str;
    fn train(&mut self, x: &Matrix, y: &Vector) -> LearnResult<()>;
    fn predict(&self, x: &Matrix) -> LearnResult<Vector>;
    fn predict_proba(&self, x: &Matrix) -> LearnResult<Vector>;
}
