#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for playing Catchball in a terminal.

mod input;
mod logging;
mod session;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use catchball_core::EncounterState;
use catchball_rendering::{JsonLines, RenderingBackend, TextPlot, Viewport};
use catchball_system_spawning::{training_dummy, Registry, Spawner};
use clap::Parser;
use log::{debug, info};

/// Throw balls at a wandering creature until it is caught or escapes.
#[derive(Debug, Parser)]
#[command(name = "catchball", version, about, long_about = None)]
struct Args {
    /// Seed for species selection and creature movement. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Species to encounter instead of a random one.
    #[arg(long, conflicts_with = "training")]
    creature: Option<String>,
    /// TOML roster replacing the standard species.
    #[arg(long, value_name = "PATH")]
    roster: Option<PathBuf>,
    /// Practice against the slow, forgiving training dummy.
    #[arg(long)]
    training: bool,
    /// Write snapshots as JSON lines instead of drawing them.
    #[arg(long)]
    json: bool,
    /// Width of the text plot in characters.
    #[arg(long, default_value_t = 60)]
    columns: usize,
    /// Height of the text plot in characters.
    #[arg(long, default_value_t = 24)]
    rows: usize,
    /// Show debug logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Catchball command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let registry = match &args.roster {
        Some(path) => Registry::load(path)
            .with_context(|| format!("failed to load roster {}", path.display()))?,
        None => Registry::standard().context("failed to build standard roster")?,
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    debug!("spawning with seed {seed}");
    let mut spawner = Spawner::new(&registry, seed);
    let mut encounter = if args.training {
        spawner.spawn_profile(&training_dummy().context("invalid training dummy")?)
    } else if let Some(name) = &args.creature {
        spawner
            .spawn_named(name)
            .with_context(|| format!("no species named '{name}' in the roster"))?
    } else {
        spawner.spawn()
    };

    let stdout = io::stdout();
    let mut backend: Box<dyn RenderingBackend> = if args.json {
        Box::new(JsonLines::new(stdout.lock()))
    } else {
        let viewport = Viewport::figure(args.columns, args.rows)?;
        Box::new(TextPlot::new(viewport, stdout.lock()))
    };

    let state = session::play(
        &mut encounter,
        io::stdin().lock(),
        backend.as_mut(),
        io::stderr(),
    )?;
    if state == EncounterState::Active {
        info!("encounter abandoned");
    }
    Ok(())
}
