//! QMixer: collapses agent values into one total Q value

use tracing::info;

use crate::evaluator::{AgentValues, NUM_AGENTS};
use crate::hash::StateHash;
use crate::literal::float_list_literal;

/// Peak-to-peak width of the noise band (±0.05)
pub const NOISE_SPAN: f64 = 0.1;

/// Fixed-weight mixer with hash-derived noise
#[derive(Debug, Clone)]
pub struct QMixer {
    weights: [f64; NUM_AGENTS],
}

impl QMixer {
    /// Uniform weights `1/N`
    pub fn new() -> Self {
        info!(agents = NUM_AGENTS, "QMixer initialized");
        Self {
            weights: [1.0 / NUM_AGENTS as f64; NUM_AGENTS],
        }
    }

    pub fn weights(&self) -> &[f64; NUM_AGENTS] {
        &self.weights
    }

    /// Weighted sum plus noise. Not clamped: noise may push it outside `[0, 1]`.
    pub fn mix(&self, values: &AgentValues) -> f64 {
        let total = values
            .iter()
            .zip(&self.weights)
            .fold(0.0, |acc, (q, w)| acc + q * w);
        total + noise(values)
    }
}

impl Default for QMixer {
    fn default() -> Self {
        Self::new()
    }
}

/// Noise term in `[-0.05, 0.05]`, keyed on the literal text of the values
pub fn noise(values: &AgentValues) -> f64 {
    let literal = float_list_literal(values);
    (StateHash::digest(literal.as_bytes()).unit_value() - 0.5) * NOISE_SPAN
}
