//! # schedsim
//!
//! Runs one scheduling policy over a process file and prints per-process
//! response and turnaround times.
//!
//! ```text
//! schedsim processes.txt --policy stcf --graph --seed 7
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (default `warn`).

#![deny(unsafe_code)]

mod loader;
mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use schedsim_execution::{Engine, SimConfig, SimFlags};
use schedsim_modules::{PolicyRegistry, RegistryError};
use std::path::PathBuf;
use std::time::Duration;

use report::GraphObserver;

/// Tick-driven CPU scheduling simulator
#[derive(Parser, Debug)]
#[command(name = "schedsim", version, about)]
struct Args {
    /// Process file: one process per line, arrival then alternating CPU/I/O bursts (ms)
    #[arg(required_unless_present = "list")]
    file: Option<PathBuf>,

    /// Scheduling policy
    #[arg(short, long, default_value = "mlfq")]
    policy: String,

    /// Print one row per tick showing what every process is doing
    #[arg(long)]
    graph: bool,

    /// Sleep between ticks
    #[arg(long)]
    real_time: bool,

    /// Tick length (ms)
    #[arg(long, value_name = "MS", default_value_t = SimConfig::DEFAULT_TICK_MS)]
    tick: u64,

    /// Wall-clock pause per tick with --real-time (ms)
    #[arg(long, value_name = "MS", default_value_t = 10)]
    pace_ms: u64,

    /// Seed for the I/O completion order
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// List registered policies and exit
    #[arg(long)]
    list: bool,
}

impl Args {
    fn sim_config(&self) -> SimConfig {
        let mut flags = SimFlags::empty();
        flags.set(SimFlags::GRAPH, self.graph);
        flags.set(SimFlags::REAL_TIME, self.real_time);

        let mut config = SimConfig::new()
            .with_tick(self.tick)
            .with_pacing(Duration::from_millis(self.pace_ms))
            .with_flags(flags);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    let registry = PolicyRegistry::with_builtin();

    if args.list {
        for policy in registry.list_all() {
            println!("{:<6} {}", policy.name, policy.description);
        }
        return Ok(());
    }

    let config = args.sim_config();
    let scheduler = match registry.create(&args.policy, &config) {
        Ok(scheduler) => scheduler,
        Err(RegistryError::UnknownPolicy(name)) => {
            bail!(
                "unknown policy '{}' (available: {})",
                name,
                registry.names().join(", ")
            );
        }
        Err(err) => return Err(err.into()),
    };

    let Some(path) = args.file.as_deref() else {
        bail!("no process file given");
    };
    let definitions = loader::load(path)?;
    if definitions.is_empty() {
        log::warn!("{} defines no processes", path.display());
    }

    let mut engine = Engine::new(definitions, scheduler, config)?;
    if args.graph {
        engine = engine.with_observer(Box::new(GraphObserver::new()));
    }

    let result = engine
        .run()
        .with_context(|| format!("simulation with policy '{}' failed", args.policy))?;
    report::print_report(&result);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
