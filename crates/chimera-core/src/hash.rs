//! SHA-256 state hashes
//!
//! The manifold state is a single SHA-256 output. Everything chained from it
//! (window offsets, agent values, action indices) reads fixed prefixes of its
//! hex form; those prefixes are taken straight from the raw bytes here.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Divisor that maps a 32-bit prefix into `[0, 1]`.
pub const UNIT_SCALE: f64 = u32::MAX as f64;

/// A SHA-256 hash (32 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateHash(pub [u8; 32]);

impl StateHash {
    /// Create a hash from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hash arbitrary data
    pub fn digest(data: &[u8]) -> Self {
        Self::digest_parts(&[data])
    }

    /// Hash the concatenation of several byte slices without joining them first
    pub fn digest_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        Self(hasher.finalize().into())
    }

    /// Parse a 64-character hex digest
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        let bytes = hex::decode(hex_str).ok()?;
        let bytes: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Get hex representation
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 8 hex characters, as shown in the replay buffer
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Value of the first 16 hex characters (selects the model window)
    pub fn window_seed(&self) -> u64 {
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&self.0[..8]);
        u64::from_be_bytes(prefix)
    }

    /// Value of hex characters 24..28 (selects the action symbol)
    pub fn action_seed(&self) -> u16 {
        u16::from_be_bytes([self.0[12], self.0[13]])
    }

    /// First 8 hex characters scaled into `[0, 1]`
    pub fn unit_value(&self) -> f64 {
        let prefix = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        f64::from(prefix) / UNIT_SCALE
    }
}

impl fmt::Debug for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}
