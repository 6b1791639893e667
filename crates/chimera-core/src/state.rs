//! Engine lifecycle states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear lifecycle: IDLE → BOOTSTRAP → KERNEL_INIT → PRIMING → ACTIVE → CRITICAL.
///
/// CRITICAL is terminal and reachable from every non-idle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineState {
    #[default]
    Idle,
    Bootstrap,
    KernelInit,
    Priming,
    Active,
    Critical,
}

impl EngineState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Bootstrap => "BOOTSTRAP",
            Self::KernelInit => "KERNEL_INIT",
            Self::Priming => "PRIMING",
            Self::Active => "ACTIVE",
            Self::Critical => "CRITICAL",
        }
    }

    /// Whether `next` is a legal successor
    pub fn can_transition_to(&self, next: EngineState) -> bool {
        match (self, next) {
            (Self::Idle, Self::Bootstrap)
            | (Self::Bootstrap, Self::KernelInit)
            | (Self::KernelInit, Self::Priming)
            | (Self::Priming, Self::Active) => true,
            (Self::Idle | Self::Critical, Self::Critical) => false,
            (_, Self::Critical) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Critical)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_path() {
        let path = [
            EngineState::Idle,
            EngineState::Bootstrap,
            EngineState::KernelInit,
            EngineState::Priming,
            EngineState::Active,
            EngineState::Critical,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_no_skips_or_recovery() {
        assert!(!EngineState::Idle.can_transition_to(EngineState::Active));
        assert!(!EngineState::Idle.can_transition_to(EngineState::Critical));
        assert!(!EngineState::Critical.can_transition_to(EngineState::Idle));
        assert!(!EngineState::Critical.can_transition_to(EngineState::Active));
        assert!(EngineState::KernelInit.can_transition_to(EngineState::Critical));
        assert!(EngineState::Critical.is_terminal());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(EngineState::KernelInit.to_string(), "KERNEL_INIT");
        assert_eq!(
            serde_json::to_string(&EngineState::KernelInit).unwrap(),
            "\"KERNEL_INIT\""
        );
    }
}
