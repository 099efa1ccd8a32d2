use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use titan_core::{LearnError, Vector};
use titan_linear::{LogisticRegression, TrainerConfig};

use crate::error::IoResult;

/// Serializable parameters of a trained logistic regression model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub learning_rate: f64,
    pub epochs: usize,
}

impl ModelSnapshot {
    pub fn from_model(model: &LogisticRegression) -> IoResult<Self> {
        if !model.is_trained() {
            return Err(LearnError::NotTrained.into());
        }
        Ok(ModelSnapshot {
            weights: model.weights().as_slice().to_vec(),
            bias: model.bias(),
            learning_rate: model.learning_rate(),
            epochs: model.epochs(),
        })
    }

    /// Rebuild a trained model; the stored hyperparameters must be valid.
    pub fn into_model(self) -> IoResult<LogisticRegression> {
        TrainerConfig::new(self.learning_rate, self.epochs).validate()?;
        Ok(LogisticRegression::from_parameters(
            Vector::from(self.weights),
            self.bias,
            self.learning_rate,
            self.epochs,
        ))
    }

    /// Save as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("model saved to {}", path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
