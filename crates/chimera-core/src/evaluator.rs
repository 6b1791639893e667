//! State evaluator: priming and the hash-chained transition
//!
//! ```text
//! prime(seed):     h0 = SHA256(seed); h_k = SHA256(h_{k-1} || seed)   (raw bytes)
//! evaluate(prev):  next = SHA256(hex(prev) || lexicon literal || window)
//!                  q_i  = SHA256(hex(next) || "_i" || window[200i..200(i+1)]) -> [0,1]
//! ```

use tracing::trace;

use crate::hash::StateHash;
use crate::lexicon::Lexicon;
use crate::model::CognitiveModel;

/// Number of agents feeding the mixer
pub const NUM_AGENTS: usize = 5;

/// Bytes of the model window handed to each agent
const AGENT_SLICE: usize = 200;

/// Per-iteration agent values, each in `[0, 1]`
pub type AgentValues = [f64; NUM_AGENTS];

/// Output of one transition
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub state: StateHash,
    pub agent_values: AgentValues,
}

/// Deterministic state transition function
#[derive(Debug, Clone)]
pub struct StateEvaluator {
    lexicon_literal: String,
    complexity: u32,
    model: Option<CognitiveModel>,
}

impl StateEvaluator {
    /// Create an evaluator; without a model every window is empty
    pub fn new(lexicon: &Lexicon, complexity: u32, model: Option<CognitiveModel>) -> Self {
        Self {
            lexicon_literal: lexicon.literal().to_string(),
            complexity,
            model,
        }
    }

    /// Priming rounds applied after the initial hash
    pub fn complexity(&self) -> u32 {
        self.complexity
    }

    /// Whether evaluations mix in model windows
    pub fn uses_model(&self) -> bool {
        self.model.is_some()
    }

    /// Derive the initial state from a seed
    pub fn prime(&self, seed: &str) -> StateHash {
        prime(seed, self.complexity)
    }

    /// Advance one step from `previous`
    pub fn evaluate(&self, previous: &StateHash) -> Evaluation {
        let window: &[u8] = match &self.model {
            Some(model) => model.window(previous),
            None => &[],
        };

        let previous_hex = previous.to_hex();
        let state = StateHash::digest_parts(&[
            previous_hex.as_bytes(),
            self.lexicon_literal.as_bytes(),
            window,
        ]);

        let state_hex = state.to_hex();
        let mut agent_values = [0.0; NUM_AGENTS];
        for (i, value) in agent_values.iter_mut().enumerate() {
            let tag = format!("_{}", i);
            let agent_hash = StateHash::digest_parts(&[
                state_hex.as_bytes(),
                tag.as_bytes(),
                agent_slice(window, i),
            ]);
            *value = agent_hash.unit_value();
        }

        trace!(state = %state, ?agent_values, "Evaluated");
        Evaluation {
            state,
            agent_values,
        }
    }
}

/// Derive the initial state from a seed with `complexity` extra rounds
pub fn prime(seed: &str, complexity: u32) -> StateHash {
    let mut current = StateHash::digest(seed.as_bytes());
    for _ in 0..complexity {
        current = StateHash::digest_parts(&[&current.0, seed.as_bytes()]);
    }
    current
}

fn agent_slice(window: &[u8], agent: usize) -> &[u8] {
    let start = (agent * AGENT_SLICE).min(window.len());
    let end = ((agent + 1) * AGENT_SLICE).min(window.len());
    &window[start..end]
}
