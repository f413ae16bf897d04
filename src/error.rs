//! Error types for network construction and training.

use thiserror::Error;

/// Errors raised while building or driving a network.
///
/// Numeric sharp edges (softmax overflow, `ln(0)` in the loss) are not
/// represented here: they surface as non-finite floats.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Raw unit-kind code outside the five known kinds
    #[error("invalid unit kind code {0}, expected a value in 0..=4")]
    InvalidUnitKind(u8),

    /// No instance to derive the topology from
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// A matrix or vector does not match the network shape
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// Invalid configuration value
    #[error("invalid parameter: {name} = {value}, reason: {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },
}

impl NetworkError {
    pub(crate) fn dimension(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        NetworkError::DimensionMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;
