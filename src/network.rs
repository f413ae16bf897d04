//! Arena-backed network: forward pass, backpropagation and prediction

use std::ops::Range;

use crate::config::InactiveReluDelta;
use crate::data::Instance;
use crate::error::{NetworkError, Result};
use crate::loss::{CrossEntropyLoss, Loss};
use crate::unit::{Unit, UnitId, UnitKind};

/// A feedforward network with one ReLU hidden layer and a softmax output layer.
///
/// All units live in a single arena ordered input layer, hidden layer,
/// output layer. The last unit of the input and hidden layers is a bias
/// unit. Built by [`crate::Topology::build`].
#[derive(Debug, Clone)]
pub struct Network {
    units: Vec<Unit>,
    inputs: Range<UnitId>,
    hiddens: Range<UnitId>,
    outputs: Range<UnitId>,
}

impl Network {
    pub(crate) fn from_parts(
        units: Vec<Unit>,
        inputs: Range<UnitId>,
        hiddens: Range<UnitId>,
        outputs: Range<UnitId>,
    ) -> Self {
        Network {
            units,
            inputs,
            hiddens,
            outputs,
        }
    }

    pub fn attribute_count(&self) -> usize {
        self.inputs.len() - 1
    }

    pub fn hidden_count(&self) -> usize {
        self.hiddens.len() - 1
    }

    pub fn class_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn input_layer(&self) -> &[Unit] {
        &self.units[self.inputs.clone()]
    }

    pub fn hidden_layer(&self) -> &[Unit] {
        &self.units[self.hiddens.clone()]
    }

    pub fn output_layer(&self) -> &[Unit] {
        &self.units[self.outputs.clone()]
    }

    /// Unit at `position` within the hidden layer (the bias unit is last)
    pub fn hidden_unit(&self, position: usize) -> Option<&Unit> {
        self.hidden_layer().get(position)
    }

    pub fn hidden_values(&self) -> Vec<f64> {
        self.hidden_layer().iter().map(Unit::output).collect()
    }

    pub fn output_values(&self) -> Vec<f64> {
        self.output_layer().iter().map(Unit::output).collect()
    }

    /// Current hidden weights, `hidden_count × (attribute_count + 1)`
    pub fn hidden_weights(&self) -> Vec<Vec<f64>> {
        weight_matrix(&self.hidden_layer()[..self.hidden_count()])
    }

    /// Current output weights, `class_count × (hidden_count + 1)`
    pub fn output_weights(&self) -> Vec<Vec<f64>> {
        weight_matrix(self.output_layer())
    }

    /// Copy attribute values into the input units
    pub fn set_inputs(&mut self, attributes: &[f64]) -> Result<()> {
        self.check_attributes(attributes)?;
        self.load_inputs(attributes);
        Ok(())
    }

    /// Full forward pass: inputs, then hidden outputs, then output outputs
    pub fn forward(&mut self, attributes: &[f64]) -> Result<()> {
        self.check_attributes(attributes)?;
        self.forward_unchecked(attributes);
        Ok(())
    }

    /// Forward pass for attributes whose length is already known to match
    pub(crate) fn forward_unchecked(&mut self, attributes: &[f64]) {
        self.load_inputs(attributes);
        self.compute_hidden_outputs();
        self.compute_output_outputs();
    }

    fn check_attributes(&self, attributes: &[f64]) -> Result<()> {
        if attributes.len() != self.attribute_count() {
            return Err(NetworkError::dimension(
                "attributes",
                self.attribute_count(),
                attributes.len(),
            ));
        }
        Ok(())
    }

    fn check_labels(&self, labels: &[f64]) -> Result<()> {
        if labels.len() != self.class_count() {
            return Err(NetworkError::dimension("labels", self.class_count(), labels.len()));
        }
        Ok(())
    }

    fn load_inputs(&mut self, attributes: &[f64]) {
        debug_assert_eq!(attributes.len(), self.attribute_count());
        for (unit, &value) in self.units[self.inputs.clone()].iter_mut().zip(attributes) {
            unit.set_input(value);
        }
    }

    fn compute_hidden_outputs(&mut self) {
        for id in self.hiddens.clone() {
            let (sources, rest) = self.units.split_at_mut(id);
            let unit = &mut rest[0];
            if unit.kind() == UnitKind::Hidden {
                let raw = unit.weighted_sum(sources);
                unit.activate_relu(raw);
            }
        }
    }

    /// Softmax over the output layer. Raw sums are computed once for the
    /// whole layer before any unit is normalized.
    fn compute_output_outputs(&mut self) {
        let raws: Vec<f64> = self
            .outputs
            .clone()
            .map(|id| self.units[id].weighted_sum(&self.units[..id]))
            .collect();
        // No max shift: very large raw sums overflow to inf/NaN
        let denominator: f64 = raws.iter().map(|raw| raw.exp()).sum();

        for (id, raw) in self.outputs.clone().zip(raws) {
            self.units[id].activate_softmax(raw, raw.exp() / denominator);
        }
    }

    /// Output deltas `label - output` for the instance last passed forward
    pub fn compute_output_deltas(&mut self, labels: &[f64]) -> Result<()> {
        self.check_labels(labels)?;
        self.compute_output_deltas_unchecked(labels);
        Ok(())
    }

    pub(crate) fn compute_output_deltas_unchecked(&mut self, labels: &[f64]) {
        let deltas = CrossEntropyLoss::delta(&self.output_values(), labels);
        for (id, delta) in self.outputs.clone().zip(deltas) {
            self.units[id].set_delta(delta);
        }
    }

    /// Hidden deltas from the output deltas. Must follow
    /// [`Network::compute_output_deltas`] and precede any weight update.
    pub fn compute_hidden_deltas(&mut self, inactive: InactiveReluDelta) {
        for (position, id) in self.hiddens.clone().enumerate() {
            if self.units[id].kind() != UnitKind::Hidden {
                continue;
            }
            // raw sum cached by the forward pass; weights have not moved since
            if self.units[id].input_value() > 0.0 {
                let delta = self.back_propagated(position);
                self.units[id].set_delta(delta);
            } else if inactive == InactiveReluDelta::Zero {
                self.units[id].set_delta(0.0);
            }
        }
    }

    /// Σ over output units of (weight of the edge from hidden `position`) × delta
    fn back_propagated(&self, position: usize) -> f64 {
        self.output_layer()
            .iter()
            .map(|output| output.edges()[position].weight * output.delta())
            .sum()
    }

    pub fn update_output_weights(&mut self, learning_rate: f64) {
        self.update_layer(self.outputs.clone(), learning_rate);
    }

    pub fn update_hidden_weights(&mut self, learning_rate: f64) {
        self.update_layer(self.hiddens.clone(), learning_rate);
    }

    fn update_layer(&mut self, layer: Range<UnitId>, learning_rate: f64) {
        for id in layer {
            let (sources, rest) = self.units.split_at_mut(id);
            rest[0].update_weights(learning_rate, sources);
        }
    }

    /// Index of the output unit with the strictly greatest output, lowest
    /// index on ties
    pub fn predict(&mut self, attributes: &[f64]) -> Result<usize> {
        self.forward(attributes)?;
        Ok(self.predicted_class())
    }

    fn predicted_class(&self) -> usize {
        let mut max = 0.0;
        let mut index = 0;
        for (i, unit) in self.output_layer().iter().enumerate() {
            if unit.output() > max {
                max = unit.output();
                index = i;
            }
        }
        index
    }

    /// Cross entropy loss of the network on one instance
    pub fn loss(&mut self, instance: &Instance) -> Result<f64> {
        self.check_attributes(&instance.attributes)?;
        self.check_labels(&instance.labels)?;
        Ok(self.loss_unchecked(instance))
    }

    /// Loss for an instance whose shape is already known to match
    pub(crate) fn loss_unchecked(&mut self, instance: &Instance) -> f64 {
        debug_assert_eq!(instance.class_count(), self.class_count());
        self.forward_unchecked(&instance.attributes);
        CrossEntropyLoss::forward(&self.output_values(), &instance.labels)
    }
}

fn weight_matrix(units: &[Unit]) -> Vec<Vec<f64>> {
    units
        .iter()
        .map(|unit| unit.edges().iter().map(|edge| edge.weight).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Topology;

    /// 2 inputs, 1 hidden, 2 outputs
    fn small_network() -> Network {
        Topology::new(2, 1, 2)
            .build(&[vec![0.5, -0.5, 0.1]], &[vec![0.2, 0.3], vec![-0.4, 0.1]])
            .unwrap()
    }

    #[test]
    fn test_forward_values() {
        let mut network = small_network();
        network.forward(&[1.0, -1.0]).unwrap();

        // raw hidden = 0.5 + 0.5 + 0.1
        assert!((network.hidden_values()[0] - 1.1).abs() < 1e-12);
        assert_eq!(network.hidden_values()[1], 1.0);

        let outputs = network.output_values();
        assert!((outputs[0] - 0.702_660_654_344_731_6).abs() < 1e-12);
        assert!((outputs[1] - 0.297_339_345_655_268_5).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let mut network = Topology::new(3, 2, 4)
            .build(
                &[vec![0.3, -0.2, 0.8, 0.1], vec![-0.6, 0.4, 0.2, -0.3]],
                &[
                    vec![0.5, -0.1, 0.2],
                    vec![-0.3, 0.7, 0.0],
                    vec![0.9, 0.4, -0.5],
                    vec![0.1, 0.1, 0.1],
                ],
            )
            .unwrap();
        network.forward(&[0.5, 1.5, -2.0]).unwrap();
        let sum: f64 = network.output_values().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(network.output_values().iter().all(|&p| p > 0.0));
    }

    #[test]
    fn test_relu_inactive_hidden() {
        let mut network = small_network();
        // raw hidden = -1.0 - 1.0 + 0.1 < 0
        network.forward(&[-2.0, 2.0]).unwrap();
        assert_eq!(network.hidden_values()[0], 0.0);
        assert!(network.hidden_unit(0).unwrap().input_value() < 0.0);
    }

    #[test]
    fn test_predict_picks_largest_output() {
        // output 1 always has the larger raw sum
        let mut network = Topology::new(2, 1, 2)
            .build(&[vec![0.0, 0.0, 1.0]], &[vec![0.0, 0.0], vec![0.0, 2.0]])
            .unwrap();
        assert_eq!(network.predict(&[1.0, 2.0]).unwrap(), 1);
        assert_eq!(network.predict(&[2.0, 1.0]).unwrap(), 1);
        assert_eq!(network.predict(&[-5.0, 7.0]).unwrap(), 1);
    }

    #[test]
    fn test_predict_ties_resolve_to_lowest_index() {
        let mut network = Topology::new(1, 1, 3)
            .build(&[vec![1.0, 0.0]], &[vec![0.5, 0.0], vec![0.5, 0.0], vec![0.0, 0.0]])
            .unwrap();
        assert_eq!(network.predict(&[1.0]).unwrap(), 0);
    }

    #[test]
    fn test_predict_rejects_wrong_attribute_count() {
        let mut network = small_network();
        assert_eq!(
            network.predict(&[1.0]).unwrap_err(),
            NetworkError::dimension("attributes", 2, 1)
        );
    }

    #[test]
    fn test_deltas() {
        let mut network = small_network();
        network.forward(&[1.0, -1.0]).unwrap();
        network.compute_output_deltas(&[1.0, 0.0]).unwrap();
        network.compute_hidden_deltas(InactiveReluDelta::Retain);

        let d0 = network.output_layer()[0].delta();
        let d1 = network.output_layer()[1].delta();
        assert!((d0 - 0.297_339_345_655_268_4).abs() < 1e-12);
        assert!((d1 + 0.297_339_345_655_268_5).abs() < 1e-12);

        // 0.2 * d0 + (-0.4) * d1
        let hidden = network.hidden_unit(0).unwrap().delta();
        assert!((hidden - 0.178_403_607_393_161_08).abs() < 1e-12);
        // bias unit never holds a delta
        assert_eq!(network.hidden_unit(1).unwrap().delta(), 0.0);
    }

    #[test]
    fn test_inactive_relu_delta_policies() {
        for policy in [InactiveReluDelta::Retain, InactiveReluDelta::Zero] {
            let mut network = small_network();
            // active pass leaves a non-zero delta behind
            network.forward(&[1.0, -1.0]).unwrap();
            network.compute_output_deltas(&[1.0, 0.0]).unwrap();
            network.compute_hidden_deltas(policy);
            let active = network.hidden_unit(0).unwrap().delta();
            assert!(active != 0.0);

            // inactive pass
            network.forward(&[-2.0, 2.0]).unwrap();
            network.compute_output_deltas(&[0.0, 1.0]).unwrap();
            network.compute_hidden_deltas(policy);
            let delta = network.hidden_unit(0).unwrap().delta();
            match policy {
                InactiveReluDelta::Retain => assert_eq!(delta, active),
                InactiveReluDelta::Zero => assert_eq!(delta, 0.0),
            }
        }
    }

    #[test]
    fn test_update_uses_source_outputs() {
        let mut network = small_network();
        network.forward(&[1.0, -1.0]).unwrap();
        network.compute_output_deltas(&[1.0, 0.0]).unwrap();
        network.compute_hidden_deltas(InactiveReluDelta::Retain);
        network.update_output_weights(0.1);
        network.update_hidden_weights(0.1);

        let output = network.output_weights();
        assert!((output[0][0] - 0.232_707_328_022_079_55).abs() < 1e-12);
        assert!((output[0][1] - 0.329_733_934_565_526_85).abs() < 1e-12);
        assert!((output[1][0] + 0.432_707_328_022_079_56).abs() < 1e-12);
        assert!((output[1][1] - 0.070_266_065_434_473_15).abs() < 1e-12);

        let hidden = network.hidden_weights();
        assert!((hidden[0][0] - 0.517_840_360_739_316).abs() < 1e-12);
        assert!((hidden[0][1] + 0.517_840_360_739_316).abs() < 1e-12);
        assert!((hidden[0][2] - 0.117_840_360_739_316_11).abs() < 1e-12);
    }

    #[test]
    fn test_loss() {
        let mut network = small_network();
        let instance = Instance::one_hot(vec![1.0, -1.0], 0, 2);
        let loss = network.loss(&instance).unwrap();
        assert!((loss + 0.702_660_654_344_731_6f64.ln()).abs() < 1e-12);
        assert!(loss.is_finite() && loss >= 0.0);
    }

    #[test]
    fn test_loss_rejects_wrong_shape() {
        let mut network = small_network();
        let three_classes = Instance::one_hot(vec![1.0, -1.0], 0, 3);
        assert_eq!(
            network.loss(&three_classes).unwrap_err(),
            NetworkError::dimension("labels", 2, 3)
        );
        let one_attribute = Instance::one_hot(vec![1.0], 0, 2);
        assert_eq!(
            network.loss(&one_attribute).unwrap_err(),
            NetworkError::dimension("attributes", 2, 1)
        );
    }
}
