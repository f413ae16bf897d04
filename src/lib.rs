//! # ReLU / Softmax Neural Network
//!
//! A from-scratch feedforward neural network in Rust: one ReLU hidden layer
//! feeding a softmax output layer, trained by online stochastic gradient
//! descent on cross entropy loss.
//!
//! The network is a graph of units and weighted edges kept in an arena and
//! addressed by index. Bias units sit at the end of the input and hidden
//! layers and always output 1.0.

mod config;
mod error;
mod network;
mod topology;
mod training;
mod unit;
pub mod data;
pub mod loss;
pub mod optimizer;
pub mod visualization;

// Re-export main types
pub use config::{InactiveReluDelta, TrainingConfig};
pub use data::Instance;
pub use error::{NetworkError, Result};
pub use network::Network;
pub use topology::Topology;
pub use training::Trainer;
pub use unit::{Edge, Unit, UnitId, UnitKind};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
