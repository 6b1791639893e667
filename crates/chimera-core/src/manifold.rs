//! The resonance manifold: evaluator, mixer and Fisher diagonal stepped together

use tracing::debug;

use crate::evaluator::{AgentValues, StateEvaluator};
use crate::fisher::FisherDiagonal;
use crate::hash::StateHash;
use crate::lexicon::Lexicon;
use crate::mixer::QMixer;
use crate::replay::{Memory, ReplayBuffer};

/// Everything derived from one step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub state: StateHash,
    pub agent_values: AgentValues,
    pub total_q: f64,
    pub fisher_mean: f64,
    /// `1 - fisher_mean`
    pub coherence: f64,
    /// `|total_q - 0.5| * 2`
    pub volatility: f64,
    pub action: String,
}

/// Mutable loop state: the current hash plus recent history
#[derive(Debug, Clone)]
pub struct Manifold {
    lexicon: Lexicon,
    evaluator: StateEvaluator,
    mixer: QMixer,
    fisher: FisherDiagonal,
    state: StateHash,
    replay: ReplayBuffer,
}

impl Manifold {
    /// Start from an already primed state
    pub fn new(lexicon: Lexicon, evaluator: StateEvaluator, initial: StateHash) -> Self {
        let fisher = FisherDiagonal::new(lexicon.len());
        Self {
            lexicon,
            evaluator,
            mixer: QMixer::new(),
            fisher,
            state: initial,
            replay: ReplayBuffer::new(),
        }
    }

    /// Prime `seed` with the evaluator and start from the result
    pub fn primed(lexicon: Lexicon, evaluator: StateEvaluator, seed: &str) -> Self {
        let initial = evaluator.prime(seed);
        Self::new(lexicon, evaluator, initial)
    }

    pub fn state(&self) -> &StateHash {
        &self.state
    }

    pub fn replay(&self) -> &ReplayBuffer {
        &self.replay
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn fisher(&self) -> &FisherDiagonal {
        &self.fisher
    }

    /// Advance one iteration and record it in the replay buffer
    pub fn step(&mut self) -> StepOutcome {
        let evaluation = self.evaluator.evaluate(&self.state);
        self.state = evaluation.state;

        let total_q = self.mixer.mix(&evaluation.agent_values);
        let fisher_mean = self.fisher.compute(&self.state);
        let coherence = 1.0 - fisher_mean;
        let volatility = (total_q - 0.5).abs() * 2.0;

        let action = self.lexicon.action_for(&self.state).to_string();
        self.replay
            .push(Memory::new(self.state.short(), action.clone(), total_q));

        debug!(
            state = %self.state,
            total_q,
            coherence,
            volatility,
            action = %action,
            "Manifold step"
        );

        StepOutcome {
            state: self.state,
            agent_values: evaluation.agent_values,
            total_q,
            fisher_mean,
            coherence,
            volatility,
            action,
        }
    }
}
