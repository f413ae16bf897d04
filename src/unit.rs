//! Units and weighted edges of the network graph

use crate::error::{NetworkError, Result};

/// Stable index of a unit inside the network arena.
pub type UnitId = usize;

/// The five kinds of unit a network is made of.
///
/// Raw codes follow the layer order: 0 input, 1 input-side bias, 2 hidden,
/// 3 output-side bias, 4 output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Input,
    InputBias,
    Hidden,
    OutputBias,
    Output,
}

impl UnitKind {
    /// Whether units of this kind own incoming edges
    pub fn has_edges(self) -> bool {
        matches!(self, UnitKind::Hidden | UnitKind::Output)
    }

    pub fn is_bias(self) -> bool {
        matches!(self, UnitKind::InputBias | UnitKind::OutputBias)
    }

    pub fn code(self) -> u8 {
        match self {
            UnitKind::Input => 0,
            UnitKind::InputBias => 1,
            UnitKind::Hidden => 2,
            UnitKind::OutputBias => 3,
            UnitKind::Output => 4,
        }
    }
}

impl TryFrom<u8> for UnitKind {
    type Error = NetworkError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(UnitKind::Input),
            1 => Ok(UnitKind::InputBias),
            2 => Ok(UnitKind::Hidden),
            3 => Ok(UnitKind::OutputBias),
            4 => Ok(UnitKind::Output),
            other => Err(NetworkError::InvalidUnitKind(other)),
        }
    }
}

/// A weighted connection from a source unit, owned by the consuming unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub source: UnitId,
    pub weight: f64,
}

impl Edge {
    pub fn new(source: UnitId, weight: f64) -> Self {
        Edge { source, weight }
    }
}

/// A computational vertex of the network.
///
/// Units never hold references to each other. Edges name their source by
/// [`UnitId`], and every source id is strictly smaller than the id of the
/// unit owning the edge, so a unit only ever reads units stored before it.
#[derive(Debug, Clone)]
pub struct Unit {
    kind: UnitKind,
    edges: Vec<Edge>,
    /// Attribute value for inputs, raw weighted sum for hidden/output units
    input_value: f64,
    output_value: f64,
    delta: f64,
}

impl Unit {
    pub fn new(kind: UnitKind) -> Self {
        Unit {
            kind,
            edges: Vec::new(),
            input_value: 0.0,
            output_value: 0.0,
            delta: 0.0,
        }
    }

    /// Create a unit from its raw kind code
    pub fn from_code(code: u8) -> Result<Self> {
        Ok(Unit::new(UnitKind::try_from(code)?))
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        debug_assert!(self.kind.has_edges(), "{:?} units own no edges", self.kind);
        self.edges.push(edge);
    }

    /// Set the attribute value. Ignored for every kind except `Input`.
    pub fn set_input(&mut self, value: f64) {
        if self.kind == UnitKind::Input {
            self.input_value = value;
        }
    }

    /// The raw weighted sum cached by the last forward pass (the attribute
    /// value for input units)
    pub fn input_value(&self) -> f64 {
        self.input_value
    }

    pub fn output(&self) -> f64 {
        match self.kind {
            UnitKind::Input => self.input_value,
            UnitKind::InputBias | UnitKind::OutputBias => 1.0,
            UnitKind::Hidden | UnitKind::Output => self.output_value,
        }
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Σ weight × source output over the incoming edges.
    ///
    /// `sources` is the arena slice holding every unit before this one.
    pub fn weighted_sum(&self, sources: &[Unit]) -> f64 {
        self.edges
            .iter()
            .map(|edge| edge.weight * sources[edge.source].output())
            .sum()
    }

    /// Store the raw sum and apply ReLU
    pub(crate) fn activate_relu(&mut self, raw: f64) {
        self.input_value = raw;
        self.output_value = raw.max(0.0);
    }

    /// Store the raw sum and the already normalized softmax output
    pub(crate) fn activate_softmax(&mut self, raw: f64, output: f64) {
        self.input_value = raw;
        self.output_value = output;
    }

    pub(crate) fn set_delta(&mut self, delta: f64) {
        if self.kind.has_edges() {
            self.delta = delta;
        }
    }

    /// `weight += learning_rate × delta × source output` for every edge
    pub(crate) fn update_weights(&mut self, learning_rate: f64, sources: &[Unit]) {
        let delta = self.delta;
        for edge in &mut self.edges {
            edge.weight += learning_rate * delta * sources[edge.source].output();
        }
    }
}
