//! Prime command - Print the primed state for a seed
//!
//! Usage:
//! ```bash
//! chimera prime "test" --complexity 1
//! chimera --data-dir data prime          # seed and complexity from the data dir
//! ```

use anyhow::{Context, Result};
use chimera_core::evaluator::prime;
use chimera_core::seed::load_seed;
use chimera_core::{ChimeraConfig, DataPaths};
use clap::Args;
use std::path::Path;
use tracing::debug;

/// Arguments for the prime command
#[derive(Args)]
pub struct PrimeArgs {
    /// Seed text (defaults to the decoded initiation sequence)
    seed: Option<String>,

    /// Priming rounds (defaults to complexity_factor from config.ini)
    #[arg(long, short = 'c')]
    complexity: Option<u32>,
}

/// Run the prime command
pub fn run(args: PrimeArgs, data_dir: &Path) -> Result<()> {
    let paths = DataPaths::new(data_dir);

    let seed = match args.seed {
        Some(seed) => seed,
        None => load_seed(&paths.seed())
            .with_context(|| format!("Failed to load seed from {}", paths.seed().display()))?,
    };

    let complexity = match args.complexity {
        Some(complexity) => complexity,
        None => {
            ChimeraConfig::load(&paths.config())
                .context("No --complexity given and config.ini could not be loaded")?
                .core
                .complexity_factor
        }
    };

    debug!(complexity, "Priming seed");
    println!("{}", prime(&seed, complexity).to_hex());
    Ok(())
}
