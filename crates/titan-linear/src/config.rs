use serde::{Deserialize, Serialize};
use titan_core::{LearnError, LearnResult};

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_EPOCHS: usize = 1000;

/// Gradient-descent hyperparameters. Missing fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub learning_rate: f64,
    pub epochs: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
        }
    }
}

impl TrainerConfig {
    pub fn new(learning_rate: f64, epochs: usize) -> Self {
        TrainerConfig {
            learning_rate,
            epochs,
        }
    }

    pub fn validate(&self) -> LearnResult<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(LearnError::InvalidHyperparameter(format!(
                "learning_rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}
