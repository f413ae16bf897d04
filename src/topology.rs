//! Wiring of the layered unit graph

use log::debug;

use crate::data::{self, Instance};
use crate::error::{NetworkError, Result};
use crate::network::Network;
use crate::unit::{Edge, Unit, UnitKind};

/// Shape of a network: attribute count, hidden unit count and class count,
/// bias units not included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    pub attribute_count: usize,
    pub hidden_count: usize,
    pub class_count: usize,
}

impl Topology {
    pub fn new(attribute_count: usize, hidden_count: usize, class_count: usize) -> Self {
        Topology {
            attribute_count,
            hidden_count,
            class_count,
        }
    }

    /// Derive the shape from a training set and a hidden unit count
    pub fn from_instances(instances: &[Instance], hidden_count: usize) -> Result<Self> {
        let (attribute_count, class_count) = data::check_shape(instances)?;
        Ok(Topology::new(attribute_count, hidden_count, class_count))
    }

    /// Input layer size including its bias unit
    pub fn input_layer_len(&self) -> usize {
        self.attribute_count + 1
    }

    /// Hidden layer size including its bias unit
    pub fn hidden_layer_len(&self) -> usize {
        self.hidden_count + 1
    }

    pub fn output_layer_len(&self) -> usize {
        self.class_count
    }

    /// Wire a network from the initial weight matrices.
    ///
    /// `hidden_weights` is `hidden_count × (attribute_count + 1)` and
    /// `output_weights` is `class_count × (hidden_count + 1)`; the last
    /// column of each is the bias weight.
    pub fn build(&self, hidden_weights: &[Vec<f64>], output_weights: &[Vec<f64>]) -> Result<Network> {
        check_matrix("hidden weight", hidden_weights, self.hidden_count, self.input_layer_len())?;
        check_matrix("output weight", output_weights, self.class_count, self.hidden_layer_len())?;

        let mut units = Vec::with_capacity(
            self.input_layer_len() + self.hidden_layer_len() + self.output_layer_len(),
        );

        let inputs = 0..self.input_layer_len();
        for _ in 0..self.attribute_count {
            units.push(Unit::new(UnitKind::Input));
        }
        units.push(Unit::new(UnitKind::InputBias));

        let hiddens = inputs.end..inputs.end + self.hidden_layer_len();
        for row in hidden_weights {
            units.push(wired_unit(UnitKind::Hidden, inputs.start, row));
        }
        units.push(Unit::new(UnitKind::OutputBias));

        let outputs = hiddens.end..hiddens.end + self.output_layer_len();
        for row in output_weights {
            units.push(wired_unit(UnitKind::Output, hiddens.start, row));
        }

        debug!(
            "Wired network: {} inputs (+1 bias), {} hidden (+1 bias), {} outputs",
            self.attribute_count, self.hidden_count, self.class_count
        );

        Ok(Network::from_parts(units, inputs, hiddens, outputs))
    }
}

/// One edge per weight, sourced from consecutive units starting at `first_source`
fn wired_unit(kind: UnitKind, first_source: usize, weights: &[f64]) -> Unit {
    let mut unit = Unit::new(kind);
    for (offset, &weight) in weights.iter().enumerate() {
        unit.push_edge(Edge::new(first_source + offset, weight));
    }
    unit
}

fn check_matrix(name: &str, matrix: &[Vec<f64>], rows: usize, cols: usize) -> Result<()> {
    if matrix.len() != rows {
        return Err(NetworkError::dimension(format!("{name} rows"), rows, matrix.len()));
    }
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != cols {
            return Err(NetworkError::dimension(format!("{name} row {i}"), cols, row.len()));
        }
    }
    Ok(())
}
