use super::Optimizer;
use crate::Network;

/// Online stochastic gradient descent
pub struct Sgd {
    learning_rate: f64,
}

impl Sgd {
    /// Create a new SGD optimizer with the specified learning rate
    pub fn new(learning_rate: f64) -> Self {
        Sgd { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl Optimizer for Sgd {
    /// `w += lr · δ · x` on every edge, output layer first
    fn step(&mut self, network: &mut Network) {
        network.update_output_weights(self.learning_rate);
        network.update_hidden_weights(self.learning_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InactiveReluDelta, Topology};

    #[test]
    fn test_sgd_step() {
        // no hidden units: the only output edge comes from the hidden bias
        let mut network = Topology::new(1, 0, 1)
            .build(&[], &[vec![0.0]])
            .unwrap();
        network.forward(&[2.0]).unwrap();
        network.compute_output_deltas(&[1.0]).unwrap();
        network.compute_hidden_deltas(InactiveReluDelta::Retain);

        // single softmax output is always 1.0, so the delta is 0
        let before = network.output_weights();
        Sgd::new(0.1).step(&mut network);
        assert_eq!(network.output_weights(), before);
    }

    #[test]
    fn test_sgd_step_direction() {
        let mut network = Topology::new(2, 1, 2)
            .build(&[vec![1.0, 0.0, 0.0]], &[vec![0.0, 0.0], vec![0.0, 0.0]])
            .unwrap();
        network.forward(&[2.0, 0.0]).unwrap();
        network.compute_output_deltas(&[1.0, 0.0]).unwrap();
        network.compute_hidden_deltas(InactiveReluDelta::Retain);

        let mut sgd = Sgd::new(0.1);
        sgd.step(&mut network);

        // outputs are 0.5 each: deltas +0.5 / -0.5, hidden output 2.0
        let output = network.output_weights();
        assert!((output[0][0] - 0.1).abs() < 1e-12);
        assert!((output[1][0] + 0.1).abs() < 1e-12);
        assert!((output[0][1] - 0.05).abs() < 1e-12);
        assert!((output[1][1] + 0.05).abs() < 1e-12);

        // hidden delta was 0.0 * 0.5 + 0.0 * -0.5 = 0
        assert_eq!(network.hidden_weights(), vec![vec![1.0, 0.0, 0.0]]);
    }
}
