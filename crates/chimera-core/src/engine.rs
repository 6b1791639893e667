//! Resonance engine: the single worker that runs a whole pipeline
//!
//! The engine owns every piece of run state. Progress leaves the worker only
//! as [`EngineEvent`]s on an unbounded channel; the consumer polls it on its
//! own schedule. A run always ends in CRITICAL with exactly one
//! [`EngineEvent::Finished`], and there is no cancellation once started.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

use crate::config::{ChimeraConfig, CoreParameters, ModelMode};
use crate::error::{ChimeraError, Failure};
use crate::evaluator::{StateEvaluator, NUM_AGENTS};
use crate::event::{EngineEvent, IterationReport};
use crate::helix::helix_frame;
use crate::lexicon::Lexicon;
use crate::manifold::Manifold;
use crate::model::CognitiveModel;
use crate::seed::load_seed;
use crate::state::EngineState;

pub const CONFIG_FILENAME: &str = "config.ini";
pub const LEXICON_FILENAME: &str = "symbology_matrix.dat";
pub const MODEL_FILENAME: &str = "cognitive_model.bin";
pub const SEED_FILENAME: &str = "initiation_sequence.log";

/// A visualization frame is logged every this many iterations
const VISUALIZATION_INTERVAL: u32 = 15;

/// Input files, all resolved inside one data directory
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> PathBuf {
        self.root.join(CONFIG_FILENAME)
    }

    pub fn lexicon(&self) -> PathBuf {
        self.root.join(LEXICON_FILENAME)
    }

    pub fn model(&self) -> PathBuf {
        self.root.join(MODEL_FILENAME)
    }

    pub fn seed(&self) -> PathBuf {
        self.root.join(SEED_FILENAME)
    }
}

/// Unconditional delays between phases and iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub phase_delay: Duration,
    pub iteration_delay: Duration,
}

impl Pacing {
    pub fn from_config(core: &CoreParameters) -> Self {
        Self {
            phase_delay: Duration::from_millis(core.phase_delay_ms),
            iteration_delay: Duration::from_millis(core.iteration_delay_ms),
        }
    }

    /// No delays at all
    pub fn immediate() -> Self {
        Self {
            phase_delay: Duration::ZERO,
            iteration_delay: Duration::ZERO,
        }
    }
}

/// Producer half of the engine → consumer queue
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: UnboundedSender<EngineEvent>,
}

impl EventSink {
    /// New sink and the receiver the consumer polls
    pub fn channel() -> (Self, UnboundedReceiver<EngineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Send an event. A consumer that has gone away is not an engine fault.
    pub fn send(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }

    pub fn log(&self, message: impl Into<String>) {
        self.send(EngineEvent::Log(message.into()));
    }
}

/// One run of the pipeline: IDLE → BOOTSTRAP → KERNEL_INIT → PRIMING → ACTIVE → CRITICAL
pub struct ResonanceEngine {
    config: ChimeraConfig,
    paths: DataPaths,
    pacing: Pacing,
    events: EventSink,
    state: EngineState,
    #[cfg(test)]
    fault: Option<&'static str>,
}

impl ResonanceEngine {
    pub fn new(config: ChimeraConfig, paths: DataPaths, events: EventSink) -> Self {
        let pacing = Pacing::from_config(&config.core);
        Self {
            config,
            paths,
            pacing,
            events,
            state: EngineState::Idle,
            #[cfg(test)]
            fault: None,
        }
    }

    /// Override the configured delays
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Run on a dedicated worker thread
    pub fn spawn(self) -> std::io::Result<JoinHandle<Failure>> {
        thread::Builder::new()
            .name("resonance-engine".to_string())
            .spawn(move || self.run())
    }

    /// Run to completion on the current thread and return the terminal reason
    pub fn run(mut self) -> Failure {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.pipeline()));
        let failure = match outcome {
            Ok(failure) => failure,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(error = %message, "Resonance engine panicked");
                self.events
                    .log(format!("[CRITICAL KERNEL PANIC] {}", message));
                Failure::Unhandled(message)
            }
        };
        self.collapse(&failure);
        failure
    }

    fn pipeline(&mut self) -> Failure {
        self.transition(EngineState::Bootstrap);
        self.events.log("Resonance Engine thread started.");
        #[cfg(test)]
        if let Some(message) = self.fault {
            panic!("{}", message);
        }
        self.pause(self.pacing.phase_delay);

        self.transition(EngineState::KernelInit);
        let model = match self.load_model() {
            Ok(model) => model,
            Err(failure) => return failure,
        };
        let lexicon = match self.load_lexicon() {
            Ok(lexicon) => lexicon,
            Err(failure) => return failure,
        };

        self.events
            .log("[EWC] Fisher Matrix initialized in CPU-bound legacy mode.");
        self.events
            .log(format!("[QMIX] Mixer initialized for {} agents.", NUM_AGENTS));
        let evaluator = StateEvaluator::new(&lexicon, self.config.core.complexity_factor, model);
        self.events.log("All cognitive subsystems initialized.");
        self.pause(self.pacing.phase_delay);

        self.transition(EngineState::Priming);
        let seed = match self.load_seed() {
            Ok(seed) => seed,
            Err(failure) => return failure,
        };
        self.events.log(
            "Priming cognitive manifold... This will consume significant CPU resources.",
        );
        let mut manifold = Manifold::primed(lexicon, evaluator, &seed);
        self.events.log(format!(
            "Manifold primed. Initial state hash: {}...",
            manifold.state()
        ));

        self.transition(EngineState::Active);
        self.resonate(&mut manifold)
    }

    fn resonate(&mut self, manifold: &mut Manifold) -> Failure {
        let max_iterations = self.config.core.max_iterations;
        let thresholds = self.config.thresholds;

        for i in 0..max_iterations {
            let outcome = manifold.step();

            self.events.send(EngineEvent::Iteration(IterationReport {
                state: self.state,
                iteration: i + 1,
                max_iterations,
                coherence: outcome.coherence,
                volatility: outcome.volatility,
                total_q: outcome.total_q,
                buffer: manifold.replay().snapshot(),
            }));

            if i % VISUALIZATION_INTERVAL == 0 {
                self.events.log(format!(
                    "\n[MANIFOLD STATE VISUALIZATION T-{}]\n{}",
                    i,
                    helix_frame(i / VISUALIZATION_INTERVAL)
                ));
            }

            if let Some(failure) = thresholds.check(outcome.coherence, outcome.volatility) {
                info!(
                    iteration = i + 1,
                    coherence = outcome.coherence,
                    volatility = outcome.volatility,
                    "Stability threshold breached"
                );
                return failure;
            }

            self.pause(self.pacing.iteration_delay);
        }

        Failure::ConvergenceTimeout
    }

    fn load_model(&self) -> Result<Option<CognitiveModel>, Failure> {
        let mode = self.config.core.model;
        if mode == ModelMode::Disabled {
            self.events
                .log("[LOADER] Cognitive core disabled by configuration.");
            return Ok(None);
        }

        let path = self.paths.model();
        self.events.log(format!(
            "[LOADER] Attempting to load cognitive core from '{}'...",
            MODEL_FILENAME
        ));

        match CognitiveModel::load(&path) {
            Ok(model) => {
                self.events.log(format!(
                    "  > Success. {:.1}MB model loaded into memory.",
                    model.size_mb()
                ));
                Ok(Some(model))
            }
            Err(ChimeraError::MissingFile(_)) if mode == ModelMode::Optional => {
                warn!(path = %path.display(), "Cognitive model not found, continuing without it");
                self.events.log(format!(
                    "  > '{}' not found. Continuing without model windows.",
                    MODEL_FILENAME
                ));
                Ok(None)
            }
            Err(ChimeraError::MissingFile(_)) => {
                self.events.log(format!(
                    "[FATAL] Cognitive model '{}' not found.",
                    MODEL_FILENAME
                ));
                Err(Failure::CognitiveCoreMissing)
            }
            Err(e) => {
                self.events
                    .log(format!("[FATAL] Failed to read model file: {}", e));
                Err(Failure::CognitiveCoreMissing)
            }
        }
    }

    fn load_lexicon(&self) -> Result<Lexicon, Failure> {
        let path = self.paths.lexicon();
        self.events
            .log(format!("[LEXICON] Loading from {}...", LEXICON_FILENAME));

        match Lexicon::load(&path) {
            Ok(lexicon) => {
                self.events
                    .log(format!("  > {} symbolic vectors loaded.", lexicon.len()));
                Ok(lexicon)
            }
            Err(e) => {
                self.events
                    .log(format!("[ERROR] Failed to parse lexicon: {}", e));
                Err(Failure::LexiconInitialization)
            }
        }
    }

    fn load_seed(&self) -> Result<String, Failure> {
        match load_seed(&self.paths.seed()) {
            Ok(seed) => {
                self.events
                    .log("Initiation log found. Using as priming seed.");
                Ok(seed)
            }
            Err(ChimeraError::MissingFile(_)) => Err(Failure::MissingSeed),
            Err(e) => {
                self.events
                    .log(format!("[ERROR] Failed to decode initiation log: {}", e));
                Err(Failure::MalformedSeed)
            }
        }
    }

    fn transition(&mut self, next: EngineState) {
        if !self.state.can_transition_to(next) {
            warn!(from = %self.state, to = %next, "Unexpected engine transition");
        }
        info!(from = %self.state, to = %next, "Engine transition");
        self.state = next;
        self.events.send(EngineEvent::State(next));
    }

    fn collapse(&mut self, failure: &Failure) {
        self.transition(EngineState::Critical);
        self.events.log(format!(
            "\n[FATAL] COGNITIVE BRIDGE COLLAPSED. REASON: {}",
            failure.reason()
        ));
        self.events.send(EngineEvent::Finished(failure.clone()));
    }

    fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths() {
        let paths = DataPaths::new("/srv/chimera");
        assert_eq!(paths.config(), PathBuf::from("/srv/chimera/config.ini"));
        assert_eq!(paths.lexicon(), PathBuf::from("/srv/chimera/symbology_matrix.dat"));
        assert_eq!(paths.model(), PathBuf::from("/srv/chimera/cognitive_model.bin"));
        assert_eq!(paths.seed(), PathBuf::from("/srv/chimera/initiation_sequence.log"));
    }

    #[test]
    fn test_pacing_from_config() {
        let config = ChimeraConfig::default();
        let pacing = Pacing::from_config(&config.core);
        assert_eq!(pacing.iteration_delay, Duration::from_millis(50));
        assert_eq!(pacing.phase_delay, Duration::from_secs(1));
        assert_eq!(Pacing::immediate().phase_delay, Duration::ZERO);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("kernel fault");
        assert_eq!(panic_message(payload.as_ref()), "kernel fault");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned fault"));
        assert_eq!(panic_message(payload.as_ref()), "owned fault");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }

    #[test]
    fn test_panic_becomes_single_unhandled_finish() {
        let (sink, mut rx) = EventSink::channel();
        let mut engine = ResonanceEngine::new(
            ChimeraConfig::default(),
            DataPaths::new("/nonexistent"),
            sink,
        )
        .with_pacing(Pacing::immediate());
        engine.fault = Some("lexicon table corrupted");

        let failure = engine.run();
        assert_eq!(failure, Failure::Unhandled("lexicon table corrupted".to_string()));
        assert_eq!(failure.reason(), "UnhandledException");

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert!(events.iter().any(|e| matches!(
            e,
            EngineEvent::Log(line) if line == "[CRITICAL KERNEL PANIC] lexicon table corrupted"
        )));
        assert!(events
            .iter()
            .any(|e| matches!(e, EngineEvent::State(EngineState::Critical))));
        let finished: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, EngineEvent::Finished(_)))
            .collect();
        assert_eq!(finished.len(), 1);
        assert!(matches!(
            events.last(),
            Some(EngineEvent::Finished(Failure::Unhandled(_)))
        ));
    }

    #[test]
    fn test_sink_survives_dropped_receiver() {
        let (sink, rx) = EventSink::channel();
        drop(rx);
        sink.log("nobody is listening");
    }
}
