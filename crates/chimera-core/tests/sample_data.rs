//! The shipped data directory must load cleanly

use std::path::PathBuf;

use chimera_core::seed::load_seed;
use chimera_core::{ChimeraConfig, DataPaths, Lexicon, ModelMode};

fn sample_paths() -> DataPaths {
    DataPaths::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"))
}

#[test]
fn sample_config_parses() {
    let config = ChimeraConfig::load(&sample_paths().config()).unwrap();
    assert_eq!(config.core.max_iterations, 500);
    assert_eq!(config.core.model, ModelMode::Optional);
    assert_eq!(config.interface.update_rate_ms, 100);
}

#[test]
fn sample_lexicon_and_seed_decode() {
    let paths = sample_paths();
    let lexicon = Lexicon::load(&paths.lexicon()).unwrap();
    assert_eq!(lexicon.len(), 12);
    assert_eq!(lexicon.names()[0], "Axiom");

    let seed = load_seed(&paths.seed()).unwrap();
    assert!(seed.starts_with("ZERO DAWN"));
}
