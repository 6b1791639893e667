//! Run command - Initiate the cognitive bridge
//!
//! Usage:
//! ```bash
//! chimera --data-dir data run
//! chimera --data-dir data run --fast
//! ```

use anyhow::{anyhow, bail, Context, Result};
use chimera_core::{
    ChimeraConfig, DataPaths, EngineEvent, EventSink, Pacing, ResonanceEngine,
};
use chrono::Local;
use clap::Args;
use colored::Colorize;
use std::io::Write;
use std::path::Path;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::dashboard::{timestamped, Applied, Dashboard, Stability};
use crate::{print_error, print_warning};

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    /// Skip the phase and iteration delays
    #[arg(long)]
    fast: bool,
}

/// Run the run command
pub async fn run(args: RunArgs, data_dir: &Path) -> Result<()> {
    let paths = DataPaths::new(data_dir);
    let config = match ChimeraConfig::load(&paths.config()) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.to_string());
            print_error("CRITICAL CONFIG ERROR: the bridge cannot be initiated");
            return Err(anyhow!(e).context("CRITICAL CONFIG ERROR"));
        }
    };

    println!("{}", "CHIMERA - Epsilon Core Interface".bold().green());
    println!("{}", "═".repeat(50).green());

    let mut stdout = std::io::stdout();
    writeln!(
        stdout,
        "{}",
        timestamped(
            Local::now(),
            "[SEQUENCE START] User initiated cognitive bridge. Locking controls."
        )
    )?;

    let (sink, rx) = EventSink::channel();
    let mut engine = ResonanceEngine::new(config.clone(), paths, sink);
    if args.fast {
        engine = engine.with_pacing(Pacing::immediate());
    }
    let handle = engine
        .spawn()
        .context("Failed to start the resonance engine thread")?;
    info!(fast = args.fast, "Resonance engine started");

    let dashboard = consume(rx, &config, &mut stdout).await?;

    handle
        .join()
        .map_err(|_| anyhow!("Resonance engine thread panicked"))?;

    println!();
    println!("{}", "Replay Buffer (last 10):".bold());
    println!("{}", dashboard.replay_table());
    println!();
    println!("  {} {}", "Final state:".dimmed(), dashboard.state().name().cyan());
    if dashboard.stability() == Stability::Critical {
        print_warning("Volatility was above the ceiling on the last iteration.");
    }
    if let Some(failure) = dashboard.outcome() {
        println!(
            "{} {}",
            "COGNITIVE BRIDGE COLLAPSED:".red().bold(),
            failure.reason().red()
        );
    }
    print_warning("Run `chimera run` again to re-initiate the bridge.");

    Ok(())
}

/// Poll the engine queue on the interface tick until the run finishes.
///
/// Every tick drains all pending events. Log lines are written as they are
/// drained; the status line is written once per tick when anything changed.
pub async fn consume<W: Write>(
    mut rx: UnboundedReceiver<EngineEvent>,
    config: &ChimeraConfig,
    out: &mut W,
) -> Result<Dashboard> {
    let mut dashboard = Dashboard::new(config.thresholds);
    let mut ticker = tokio::time::interval(config.interface.update_rate());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let mut updated = false;
        let mut finished = false;
        loop {
            match rx.try_recv() {
                Ok(event) => match dashboard.apply(event) {
                    Applied::Log(line) => writeln!(out, "{}", timestamped(Local::now(), &line))?,
                    Applied::Updated => updated = true,
                    Applied::Finished => {
                        finished = true;
                        break;
                    }
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    bail!("Resonance engine stopped without reporting an outcome")
                }
            }
        }

        if updated {
            writeln!(out, "{}", dashboard.status_line())?;
        }
        if finished {
            out.flush()?;
            return Ok(dashboard);
        }
    }
}
