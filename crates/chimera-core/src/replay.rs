//! Replay buffer of recent iterations (display only)

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Entries retained before the oldest is evicted
pub const REPLAY_CAPACITY: usize = 10;

/// One remembered iteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// First 8 hex characters of the state hash
    pub state: String,
    /// Selected action symbol
    pub action: String,
    /// Total Q value to three decimals
    pub reward: String,
}

impl Memory {
    pub fn new(state: impl Into<String>, action: impl Into<String>, total_q: f64) -> Self {
        Self {
            state: state.into(),
            action: action.into(),
            reward: format!("{:.3}", total_q),
        }
    }
}

/// Bounded ring, oldest first
#[derive(Debug, Clone, Default)]
pub struct ReplayBuffer {
    entries: VecDeque<Memory>,
}

impl ReplayBuffer {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(REPLAY_CAPACITY),
        }
    }

    /// Append, evicting the oldest entry when full
    pub fn push(&mut self, memory: Memory) {
        if self.entries.len() == REPLAY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(memory);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Memory> {
        self.entries.iter()
    }

    /// Owned copy, oldest to newest
    pub fn snapshot(&self) -> Vec<Memory> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn memory(i: usize) -> Memory {
        Memory::new(format!("{:08x}", i), "alpha", i as f64 / 100.0)
    }

    #[test]
    fn test_reward_formatting() {
        assert_eq!(Memory::new("ec7ba2df", "beta", 0.30758773227166103).reward, "0.308");
        assert_eq!(Memory::new("ec7ba2df", "beta", -0.0123).reward, "-0.012");
    }

    #[test]
    fn test_evicts_oldest() {
        let mut buffer = ReplayBuffer::new();
        for i in 0..12 {
            buffer.push(memory(i));
        }
        assert_eq!(buffer.len(), REPLAY_CAPACITY);
        assert_eq!(buffer.iter().next().unwrap(), &memory(2));
        assert_eq!(buffer.iter().next_back().unwrap(), &memory(11));
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity_and_keeps_latest(n in 0usize..64) {
            let mut buffer = ReplayBuffer::new();
            for i in 0..n {
                buffer.push(memory(i));
                prop_assert!(buffer.len() <= REPLAY_CAPACITY);
            }
            let expected: Vec<Memory> =
                (n.saturating_sub(REPLAY_CAPACITY)..n).map(memory).collect();
            prop_assert_eq!(buffer.snapshot(), expected);
        }
    }
}
