//! Messages from the engine worker to its consumer
//!
//! Events are immutable values; the worker never touches consumer state.

use serde::{Deserialize, Serialize};

use crate::error::Failure;
use crate::replay::Memory;
use crate::state::EngineState;

/// Telemetry for one ACTIVE iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    pub state: EngineState,
    /// 1-based iteration number
    pub iteration: u32,
    pub max_iterations: u32,
    pub coherence: f64,
    pub volatility: f64,
    pub total_q: f64,
    /// Replay buffer contents, oldest first
    pub buffer: Vec<Memory>,
}

impl IterationReport {
    /// `"12/500"`
    pub fn progress(&self) -> String {
        format!("{}/{}", self.iteration, self.max_iterations)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Human-readable progress line
    Log(String),
    /// Lifecycle transition
    State(EngineState),
    /// ACTIVE iteration telemetry
    Iteration(IterationReport),
    /// Run ended; always the last event of a run
    Finished(Failure),
}
