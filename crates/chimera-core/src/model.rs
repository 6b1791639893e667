//! Cognitive model blob
//!
//! An opaque binary file held in memory. Each evaluation reads a 1024-byte
//! window from it at an offset chosen by the current state hash.

use std::path::Path;
use tracing::info;

use crate::error::{ChimeraError, ChimeraResult};
use crate::hash::StateHash;

/// Bytes read from the model per evaluation
pub const WINDOW_LEN: usize = 1024;

/// In-memory model blob, always larger than one window
#[derive(Clone)]
pub struct CognitiveModel {
    data: Vec<u8>,
}

impl CognitiveModel {
    /// Wrap raw bytes
    pub fn from_bytes(data: Vec<u8>) -> ChimeraResult<Self> {
        if data.len() <= WINDOW_LEN {
            return Err(ChimeraError::ModelTooSmall(data.len()));
        }
        Ok(Self { data })
    }

    /// Read the whole file into memory
    pub fn load(path: &Path) -> ChimeraResult<Self> {
        let data = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ChimeraError::MissingFile(path.to_path_buf())
            } else {
                ChimeraError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let model = Self::from_bytes(data)?;
        info!(path = %path.display(), bytes = model.len(), "Cognitive model loaded");
        Ok(model)
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed model
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size in MiB, for display
    pub fn size_mb(&self) -> f64 {
        self.data.len() as f64 / (1024.0 * 1024.0)
    }

    /// Offset of the window selected by `state`
    pub fn window_offset(&self, state: &StateHash) -> usize {
        // len > WINDOW_LEN, so the modulus is non-zero
        let span = (self.data.len() - WINDOW_LEN) as u64;
        (state.window_seed() % span) as usize
    }

    /// The 1024-byte window selected by `state`
    pub fn window(&self, state: &StateHash) -> &[u8] {
        let offset = self.window_offset(state);
        &self.data[offset..offset + WINDOW_LEN]
    }
}

impl std::fmt::Debug for CognitiveModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CognitiveModel")
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|i| ((i * 31 + 7) % 256) as u8).collect()
    }

    #[test]
    fn test_rejects_small_blob() {
        assert!(matches!(
            CognitiveModel::from_bytes(vec![0; WINDOW_LEN]),
            Err(ChimeraError::ModelTooSmall(1024))
        ));
        assert!(CognitiveModel::from_bytes(vec![0; WINDOW_LEN + 1]).is_ok());
    }

    #[test]
    fn test_window_offset_from_state_prefix() {
        let model = CognitiveModel::from_bytes(patterned(4096)).unwrap();
        let state = StateHash::from_hex(
            "206dfc4e0335fa0ad986b9c1942dd65389f73b95df0a4090e6885a4e7a032bcd",
        )
        .unwrap();

        let expected = (0x206d_fc4e_0335_fa0a_u64 % 3072) as usize;
        assert_eq!(model.window_offset(&state), expected);

        let window = model.window(&state);
        assert_eq!(window.len(), WINDOW_LEN);
        assert_eq!(window[0], ((expected * 31 + 7) % 256) as u8);
    }

    #[test]
    fn test_load_missing_and_present() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cognitive_model.bin");
        assert!(matches!(
            CognitiveModel::load(&path),
            Err(ChimeraError::MissingFile(_))
        ));

        std::fs::write(&path, patterned(2 * 1024 * 1024)).unwrap();
        let model = CognitiveModel::load(&path).unwrap();
        assert_eq!(model.len(), 2 * 1024 * 1024);
        assert!((model.size_mb() - 2.0).abs() < f64::EPSILON);
    }
}
