//! # Chimera Core
//!
//! Engine for the Chimera resonance manifold:
//! - [`Lexicon`]: base64/JSON symbol table, each name bound to its SHA-256
//! - [`StateEvaluator`]: priming and the hash-chained state transition
//! - [`QMixer`]: weighted agent-value mixing with hash-derived noise
//! - [`FisherDiagonal`]: per-parameter diagonal recomputed every step
//! - [`ResonanceEngine`]: the worker that walks IDLE → … → CRITICAL and
//!   publishes [`EngineEvent`]s to a polling consumer
//!
//! Everything downstream of the seed is deterministic: the same seed,
//! complexity factor, lexicon and model blob always produce the same
//! trajectory.
//!
//! ## Quick Start
//!
//! ```rust
//! use chimera_core::{Lexicon, StateEvaluator};
//!
//! let lexicon = Lexicon::from_names(["alpha", "beta"]).unwrap();
//! let evaluator = StateEvaluator::new(&lexicon, 1, None);
//!
//! let initial = evaluator.prime("test");
//! let step = evaluator.evaluate(&initial);
//! assert_eq!(step.agent_values.len(), 5);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod event;
pub mod fisher;
pub mod hash;
pub mod helix;
pub mod lexicon;
pub mod literal;
pub mod manifold;
pub mod mixer;
pub mod model;
pub mod replay;
pub mod seed;
pub mod state;

pub use config::{
    ChimeraConfig, ConfigError, CoreParameters, InterfaceSettings, ModelMode, StabilityThresholds,
};
pub use engine::{DataPaths, EventSink, Pacing, ResonanceEngine};
pub use error::{ChimeraError, Failure};
pub use evaluator::{AgentValues, Evaluation, StateEvaluator, NUM_AGENTS};
pub use event::{EngineEvent, IterationReport};
pub use fisher::FisherDiagonal;
pub use hash::StateHash;
pub use helix::helix_frame;
pub use lexicon::Lexicon;
pub use manifold::{Manifold, StepOutcome};
pub use mixer::QMixer;
pub use model::CognitiveModel;
pub use replay::{Memory, ReplayBuffer, REPLAY_CAPACITY};
pub use state::EngineState;
