//! Epoch-based online training loop

use log::{info, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{InactiveReluDelta, TrainingConfig};
use crate::data::Instance;
use crate::error::Result;
use crate::network::Network;
use crate::optimizer::{Optimizer, Sgd};
use crate::topology::Topology;

/// Owns a network, its training set and the random source shuffling it.
///
/// The same seed yields the same shuffle sequence, and so the same weights
/// and per-epoch losses.
pub struct Trainer<R: Rng> {
    network: Network,
    training_set: Vec<Instance>,
    config: TrainingConfig,
    optimizer: Sgd,
    rng: R,
}

impl<R: Rng> Trainer<R> {
    /// Build the network from the shape of `training_set` and the initial
    /// weight matrices
    pub fn new(
        training_set: Vec<Instance>,
        hidden_count: usize,
        config: TrainingConfig,
        rng: R,
        hidden_weights: &[Vec<f64>],
        output_weights: &[Vec<f64>],
    ) -> Result<Self> {
        config.validate()?;
        let topology = Topology::from_instances(&training_set, hidden_count)?;
        let network = topology.build(hidden_weights, output_weights)?;

        Ok(Trainer {
            network,
            training_set,
            optimizer: Sgd::new(config.learning_rate),
            config,
            rng,
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// The training set in its current (last shuffled) order
    pub fn training_set(&self) -> &[Instance] {
        &self.training_set
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run `max_epoch` epochs and return the mean loss of each.
    ///
    /// Every epoch shuffles the training set in place, trains on each
    /// instance in turn, then measures the mean loss over the whole set.
    /// Instance shapes were checked by [`Trainer::new`], so nothing in the
    /// loop can fail.
    pub fn train(&mut self) -> Vec<f64> {
        let mut losses = Vec::with_capacity(self.config.max_epoch);

        for epoch in 0..self.config.max_epoch {
            self.training_set.shuffle(&mut self.rng);

            for instance in &self.training_set {
                train_instance(
                    &mut self.network,
                    &mut self.optimizer,
                    self.config.inactive_relu_delta,
                    instance,
                );
            }

            let mut total_loss = 0.0;
            for instance in &self.training_set {
                total_loss += self.network.loss_unchecked(instance);
            }
            let mean = total_loss / self.training_set.len() as f64;

            info!("Epoch {}, Loss: {:.8e}", epoch, mean);
            if !mean.is_finite() {
                warn!("Epoch {} loss is not finite, outputs may have under- or overflowed", epoch);
            }
            losses.push(mean);
        }

        losses
    }

    pub fn predict(&mut self, instance: &Instance) -> Result<usize> {
        self.network.predict(&instance.attributes)
    }

    pub fn loss(&mut self, instance: &Instance) -> Result<f64> {
        self.network.loss(instance)
    }

    /// Fraction of `instances` whose prediction matches their hot label
    pub fn accuracy(&mut self, instances: &[Instance]) -> Result<f64> {
        if instances.is_empty() {
            return Ok(0.0);
        }
        let mut correct = 0;
        for instance in instances {
            if self.network.predict(&instance.attributes)? == instance.class_index() {
                correct += 1;
            }
        }
        Ok(correct as f64 / instances.len() as f64)
    }
}

/// forward, output deltas, hidden deltas, then the weight step
fn train_instance(
    network: &mut Network,
    optimizer: &mut impl Optimizer,
    inactive: InactiveReluDelta,
    instance: &Instance,
) {
    network.forward_unchecked(&instance.attributes);
    network.compute_output_deltas_unchecked(&instance.labels);
    network.compute_hidden_deltas(inactive);
    optimizer.step(network);
}
