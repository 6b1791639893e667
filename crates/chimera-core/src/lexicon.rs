//! Symbology lexicon
//!
//! The lexicon file is base64 of a JSON array of `{ "name": ... }` entries.
//! Each distinct name is bound to the SHA-256 of its UTF-8 bytes. The file
//! order of *all* entries (duplicates included) is kept separately because
//! action lookup indexes into it.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{ChimeraError, ChimeraResult};
use crate::hash::StateHash;
use crate::literal::string_map_literal;
use crate::seed::read_base64_text;

#[derive(Debug, Deserialize)]
struct SymbolEntry {
    name: String,
}

/// Immutable symbol table
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Distinct names in first-seen order with their digests
    vectors: Vec<(String, StateHash)>,
    /// Every entry name in file order
    names: Vec<String>,
    /// Literal text of the name → hex digest map
    literal: String,
}

impl Lexicon {
    /// Load from a base64-encoded JSON file
    pub fn load(path: &Path) -> ChimeraResult<Self> {
        let json = read_base64_text(path)?;
        let lexicon = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            symbols = lexicon.len(),
            "Lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Parse the decoded JSON array
    pub fn from_json(json: &str) -> ChimeraResult<Self> {
        let entries: Vec<SymbolEntry> = serde_json::from_str(json)?;
        Self::from_names(entries.into_iter().map(|e| e.name))
    }

    /// Build directly from names
    pub fn from_names<I, S>(names: I) -> ChimeraResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(ChimeraError::EmptyLexicon);
        }

        let mut seen = HashSet::with_capacity(names.len());
        let mut vectors = Vec::with_capacity(names.len());
        for name in &names {
            if seen.insert(name.as_str()) {
                vectors.push((name.clone(), StateHash::digest(name.as_bytes())));
            }
        }

        let hex_digests: Vec<String> = vectors.iter().map(|(_, h)| h.to_hex()).collect();
        let literal = string_map_literal(
            vectors
                .iter()
                .zip(&hex_digests)
                .map(|((name, _), hex)| (name.as_str(), hex.as_str())),
        );

        Ok(Self {
            vectors,
            names,
            literal,
        })
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Always false for a constructed lexicon
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Every entry name in file order, duplicates included
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Digest bound to a symbol
    pub fn vector(&self, name: &str) -> Option<&StateHash> {
        self.vectors
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, hash)| hash)
    }

    /// Distinct symbols with their digests, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateHash)> {
        self.vectors.iter().map(|(n, h)| (n.as_str(), h))
    }

    /// Symbol selected by a state hash
    pub fn action_for(&self, state: &StateHash) -> &str {
        let index = usize::from(state.action_seed()) % self.names.len();
        &self.names[index]
    }

    /// Literal text of the map, as chained into every evaluation
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use tempfile::tempdir;

    #[test]
    fn test_digests_and_literal() {
        let lexicon = Lexicon::from_names(["alpha", "beta"]).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(
            lexicon.vector("alpha").unwrap().to_hex(),
            "8ed3f6ad685b959ead7022518e1af76cd816f8e8ec7ccdda1ed4018e8f2223f8"
        );
        assert_eq!(
            lexicon.literal(),
            "{'alpha': '8ed3f6ad685b959ead7022518e1af76cd816f8e8ec7ccdda1ed4018e8f2223f8', \
             'beta': 'f44e64e75f3948e9f73f8dfa94721c4ce8cbb4f265c4790c702b2d41cfbf2753'}"
        );
    }

    #[test]
    fn test_duplicates_keep_action_order() {
        let lexicon = Lexicon::from_names(["alpha", "beta", "alpha"]).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.names().len(), 3);
        let distinct: Vec<&str> = lexicon.iter().map(|(n, _)| n).collect();
        assert_eq!(distinct, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_empty_rejected() {
        let err = Lexicon::from_json("[]").unwrap_err();
        assert!(matches!(err, ChimeraError::EmptyLexicon));
    }

    #[test]
    fn test_extra_fields_ignored_missing_name_rejected() {
        let lexicon = Lexicon::from_json(r#"[{"name": "alpha", "weight": 3}]"#).unwrap();
        assert_eq!(lexicon.names(), ["alpha".to_string()]);

        let err = Lexicon::from_json(r#"[{"label": "alpha"}]"#).unwrap_err();
        assert!(matches!(err, ChimeraError::Json(_)));
    }

    #[test]
    fn test_action_for_wraps_over_all_entries() {
        let lexicon = Lexicon::from_names(["alpha", "beta"]).unwrap();
        // action seed 0x5437 is odd
        let state = StateHash::from_hex(
            "ec7ba2dfff15642b3f0c6545543708204e54600a70c5b2ee10adc91fe6185314",
        )
        .unwrap();
        assert_eq!(lexicon.action_for(&state), "beta");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("symbology_matrix.dat");
        let json = r#"[{"name": "alpha"}, {"name": "beta"}]"#;
        std::fs::write(&path, STANDARD.encode(json)).unwrap();

        let lexicon = Lexicon::load(&path).unwrap();
        assert_eq!(lexicon.names(), ["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn test_load_rejects_non_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("symbology_matrix.dat");
        std::fs::write(&path, STANDARD.encode("not json")).unwrap();

        assert!(matches!(
            Lexicon::load(&path).unwrap_err(),
            ChimeraError::Json(_)
        ));
    }
}
