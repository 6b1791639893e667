//! Chimera CLI - front end for the resonance manifold
//!
//! # Usage
//!
//! ```bash
//! # Start a run against the files in ./data
//! chimera --data-dir data run
//!
//! # Same, without the pacing delays
//! chimera --data-dir data run --fast
//!
//! # Show the active parameters
//! chimera --data-dir data params
//!
//! # Print the primed state for a seed
//! chimera prime "test" --complexity 1
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;
mod dashboard;

use commands::{params, prime, run};

/// Chimera - Epsilon Core Interface
///
/// Drives the hash-chained cognitive manifold from a terminal.
#[derive(Parser)]
#[command(
    name = "chimera",
    version,
    about = "Chimera - Epsilon Core Interface",
    long_about = "Chimera evolves a cognitive manifold through iterative SHA-256 chaining.\n\n\
                  A background engine primes the manifold from an initiation seed and\n\
                  iterates until a stability threshold is breached or the cap is reached."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding config.ini, the lexicon, the seed and the model
    #[arg(
        long,
        short = 'd',
        value_name = "DIR",
        env = "CHIMERA_DATA_DIR",
        default_value = ".",
        global = true
    )]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initiate the cognitive bridge
    #[command(name = "run")]
    Run(run::RunArgs),

    /// Show active parameters
    #[command(name = "params")]
    Params(params::ParamsArgs),

    /// Print the primed state hash for a seed
    #[command(name = "prime")]
    Prime(prime::PrimeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => run::run(args, &cli.data_dir).await,
        Commands::Params(args) => params::run(args, &cli.data_dir),
        Commands::Prime(args) => prime::run(args, &cli.data_dir),
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Print a success message with a checkmark
pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print an error message with an X
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg);
}
