//! Training configuration

use crate::error::{NetworkError, Result};

/// What happens to a hidden unit's delta when its raw sum is not positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InactiveReluDelta {
    /// Keep the delta left over from the previous instance
    #[default]
    Retain,
    /// Reset the delta to zero (the ReLU sub-gradient)
    Zero,
}

/// Hyperparameters of the online training loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub max_epoch: usize,
    pub inactive_relu_delta: InactiveReluDelta,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            learning_rate: 0.01,
            max_epoch: 100,
            inactive_relu_delta: InactiveReluDelta::Retain,
        }
    }
}

impl TrainingConfig {
    pub fn new(learning_rate: f64, max_epoch: usize) -> Self {
        TrainingConfig {
            learning_rate,
            max_epoch,
            ..Default::default()
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_epoch(mut self, max_epoch: usize) -> Self {
        self.max_epoch = max_epoch;
        self
    }

    pub fn with_inactive_relu_delta(mut self, policy: InactiveReluDelta) -> Self {
        self.inactive_relu_delta = policy;
        self
    }

    /// Reject values the training loop cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() {
            return Err(NetworkError::InvalidParameter {
                name: "learning_rate".to_string(),
                value: self.learning_rate.to_string(),
                reason: "must be finite".to_string(),
            });
        }
        Ok(())
    }
}
