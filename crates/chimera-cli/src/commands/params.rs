//! Params command - Show active parameters
//!
//! Usage:
//! ```bash
//! chimera --data-dir data params
//! ```

use anyhow::{anyhow, Result};
use chimera_core::{ChimeraConfig, DataPaths};
use clap::Args;
use colored::Colorize;
use std::path::Path;

use crate::{print_error, print_success, print_warning};

/// Arguments for the params command
#[derive(Args)]
pub struct ParamsArgs;

/// Run the params command
pub fn run(_args: ParamsArgs, data_dir: &Path) -> Result<()> {
    let paths = DataPaths::new(data_dir);
    let config = ChimeraConfig::load(&paths.config()).map_err(|e| {
        print_error(&e.to_string());
        anyhow!(e).context("CRITICAL CONFIG ERROR")
    })?;

    println!("{}", "Active Parameters:".bold());
    println!("  {} {}", "Complexity:".dimmed(), config.core.complexity_factor.to_string().green());
    println!("  {} {}", "Max Iter:".dimmed(), config.core.max_iterations.to_string().green());
    println!(
        "  {} {}",
        "Coherence min:".dimmed(),
        config.thresholds.coherence_min.to_string().green()
    );
    println!(
        "  {} {}",
        "Volatility max:".dimmed(),
        config.thresholds.volatility_max.to_string().green()
    );
    println!(
        "  {} {} ms",
        "Refresh rate:".dimmed(),
        config.interface.update_rate_ms.to_string().green()
    );
    println!(
        "  {} {} ms / {} ms",
        "Delays (phase/iter):".dimmed(),
        config.core.phase_delay_ms,
        config.core.iteration_delay_ms
    );
    println!("  {} {:?}", "Model mode:".dimmed(), config.core.model);
    println!();

    println!("{}", "Data Files:".bold());
    for (label, path) in [
        ("Lexicon", paths.lexicon()),
        ("Seed", paths.seed()),
        ("Model", paths.model()),
    ] {
        let message = format!("{}: {}", label, path.display());
        if path.exists() {
            print_success(&message);
        } else {
            print_warning(&format!("{} (missing)", message));
        }
    }

    Ok(())
}
