//! Error and failure types
//!
//! [`ChimeraError`] covers faults while loading inputs. [`Failure`] is the
//! terminal reason a run ends with; every run ends with exactly one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Faults raised while loading and decoding run inputs
#[derive(Debug, thiserror::Error)]
pub enum ChimeraError {
    #[error("Required file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed base64 in {}: {source}", .path.display())]
    Base64 {
        path: PathBuf,
        #[source]
        source: base64::DecodeError,
    },

    #[error("Decoded content of {} is not UTF-8", .path.display())]
    Utf8 { path: PathBuf },

    #[error("Malformed lexicon JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Lexicon contains no symbols")]
    EmptyLexicon,

    #[error("Cognitive model is {0} bytes; more than 1024 are required")]
    ModelTooSmall(usize),
}

/// Result alias for loader operations
pub type ChimeraResult<T> = Result<T, ChimeraError>;

/// Why a run ended. Every variant is terminal; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Failure {
    /// Model blob required but missing, unreadable or too small
    CognitiveCoreMissing,
    /// Lexicon missing or malformed
    LexiconInitialization,
    /// Seed file missing
    MissingSeed,
    /// Seed file is not base64 of UTF-8 text
    MalformedSeed,
    /// Coherence fell below the configured floor
    CoherenceCollapse,
    /// Volatility rose above the configured ceiling
    VolatilityExceeded,
    /// Iteration cap reached without a threshold breach
    ConvergenceTimeout,
    /// The pipeline panicked
    Unhandled(String),
}

impl Failure {
    /// Human-readable reason string
    pub fn reason(&self) -> &'static str {
        match self {
            Self::CognitiveCoreMissing => "CognitiveCoreMissing",
            Self::LexiconInitialization => "LexiconInitializationError",
            Self::MissingSeed => "MissingSeedError",
            Self::MalformedSeed => "MalformedSeedError",
            Self::CoherenceCollapse => "Resonance Cascade (Coherence Collapse)",
            Self::VolatilityExceeded => "State Decoherence (Volatility Exceeded)",
            Self::ConvergenceTimeout => "Convergence Timeout",
            Self::Unhandled(_) => "UnhandledException",
        }
    }

    /// Whether the run reached ACTIVE and broke a stability threshold
    pub fn is_threshold_breach(&self) -> bool {
        matches!(self, Self::CoherenceCollapse | Self::VolatilityExceeded)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}
