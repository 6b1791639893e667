//! Base64 text inputs (initiation seed, lexicon payload)

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use tracing::debug;

use crate::error::{ChimeraError, ChimeraResult};

/// Read a file holding base64 text and decode it to a UTF-8 string.
///
/// ASCII whitespace anywhere in the file (line wrapping, trailing newline)
/// is ignored. Anything else outside the standard alphabet, or non-zero
/// trailing bits, is rejected as malformed.
pub fn read_base64_text(path: &Path) -> ChimeraResult<String> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ChimeraError::MissingFile(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ChimeraError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let compact: Vec<u8> = raw
        .into_iter()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    let decoded = STANDARD
        .decode(&compact)
        .map_err(|source| ChimeraError::Base64 {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), bytes = decoded.len(), "Decoded base64 input");

    String::from_utf8(decoded).map_err(|_| ChimeraError::Utf8 {
        path: path.to_path_buf(),
    })
}

/// Load the priming seed from an initiation sequence file
pub fn load_seed(path: &Path) -> ChimeraResult<String> {
    read_base64_text(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_seed_roundtrip_with_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("initiation_sequence.log");
        std::fs::write(&path, "dGVzdA==\n").unwrap();

        assert_eq!(load_seed(&path).unwrap(), "test");
    }

    #[test]
    fn test_missing_seed() {
        let dir = tempdir().unwrap();
        let err = load_seed(&dir.path().join("nope.log")).unwrap_err();
        assert!(matches!(err, ChimeraError::MissingFile(_)));
    }

    #[test]
    fn test_malformed_base64() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("initiation_sequence.log");
        std::fs::write(&path, "not*base64!").unwrap();

        let err = load_seed(&path).unwrap_err();
        assert!(matches!(err, ChimeraError::Base64 { .. }));
    }

    #[test]
    fn test_non_zero_trailing_bits_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("initiation_sequence.log");
        std::fs::write(&path, "dGVzdB==").unwrap();

        let err = load_seed(&path).unwrap_err();
        assert!(matches!(err, ChimeraError::Base64 { .. }));
    }

    #[test]
    fn test_non_utf8_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("initiation_sequence.log");
        std::fs::write(&path, STANDARD.encode([0xFFu8, 0xFE, 0xFD])).unwrap();

        let err = load_seed(&path).unwrap_err();
        assert!(matches!(err, ChimeraError::Utf8 { .. }));
    }
}
