//! EWC Fisher matrix diagonal
//!
//! One hash-derived value per lexicon parameter, fully recomputed on every
//! call. Only the mean feeds the loop; the diagonal itself is kept for
//! inspection.

use tracing::info;

use crate::hash::StateHash;

#[derive(Debug, Clone)]
pub struct FisherDiagonal {
    diagonal: Vec<f64>,
}

impl FisherDiagonal {
    /// Diagonal over `num_params` parameters. Callers pass the lexicon size,
    /// which is never zero.
    pub fn new(num_params: usize) -> Self {
        info!(params = num_params, "Fisher matrix initialized (CPU)");
        Self {
            diagonal: vec![0.0; num_params],
        }
    }

    pub fn num_params(&self) -> usize {
        self.diagonal.len()
    }

    /// Last computed diagonal
    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    /// Recompute every entry from `state` and return their mean
    pub fn compute(&mut self, state: &StateHash) -> f64 {
        let state_hex = state.to_hex();
        for (i, slot) in self.diagonal.iter_mut().enumerate() {
            let param_seed = format!("{}_{}", state_hex, i);
            *slot = StateHash::digest(param_seed.as_bytes()).unit_value();
        }
        let sum = self.diagonal.iter().fold(0.0, |acc, v| acc + v);
        sum / self.diagonal.len() as f64
    }
}
