//! Loss functions for training neural networks

mod cross_entropy;

pub use cross_entropy::CrossEntropyLoss;

/// Common trait for loss functions
pub trait Loss {
    /// Calculate the loss between output values and targets
    fn forward(outputs: &[f64], targets: &[f64]) -> f64;

    /// Output-unit deltas used by backpropagation
    fn delta(outputs: &[f64], targets: &[f64]) -> Vec<f64>;
}
