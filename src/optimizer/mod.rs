//! Weight update rules

mod sgd;

pub use sgd::Sgd;

use crate::Network;

/// Common trait for optimizers
pub trait Optimizer {
    /// Apply a single optimization step using the deltas currently held by
    /// the network's units
    fn step(&mut self, network: &mut Network);
}
