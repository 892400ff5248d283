use serde::{Deserialize, Serialize};
use std::fmt;

/// The three fixed layer sizes of a one-hidden-layer network.
///
/// Fixed for the lifetime of a `Network`; every vector and matrix in the
/// engine is sized from these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl Topology {
    /// Builds a topology. All three sizes must be at least 1.
    pub fn new(inputs: usize, hidden: usize, outputs: usize) -> Topology {
        assert!(
            inputs >= 1 && hidden >= 1 && outputs >= 1,
            "topology sizes must be positive (got {}-{}-{})",
            inputs,
            hidden,
            outputs
        );
        Topology { inputs, hidden, outputs }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.inputs, self.hidden, self.outputs)
    }
}
