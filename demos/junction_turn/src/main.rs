//! junction_turn — runs one catalog scenario on a synthetic four-way
//! junction and writes the run to CSV.
//!
//! The ego approaches from the west at a constant speed; the other vehicle
//! waits on the south approach, times its arrival to the ego's, and turns
//! right across it.
//!
//! ```text
//! RUST_LOG=debug junction_turn --scenario turning_right_at_signalized_junction --randomize --seed 7
//! junction_turn --repetitions 5 --randomize
//! junction_turn --list
//! ```

mod junction;
#[cfg(test)]
mod tests;

use std::io::Cursor;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sr_core::ScenarioConfig;
use sr_output::{CsvWriter, ScenarioOutputObserver};
use sr_scenario::{ScenarioActors, ScenarioKind};
use sr_world::{load_spawns_csv, load_spawns_reader, ActorSpawn, ActorStoreBuilder, Simulation};

// ── Spawns ────────────────────────────────────────────────────────────────────

// Ego eastbound on the west approach at 10 m/s, other at rest northbound on
// the south approach.
const SPAWNS_CSV: &str = "\
actor_id,role,x,y,z,yaw_deg,speed\n\
0,ego,-60.0,-1.75,0.0,0.0,10.0\n\
1,other,1.75,-60.0,0.0,90.0,0.0\n\
";

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "junction_turn")]
#[command(about = "Run a junction scenario against the kinematic world", version)]
struct Cli {
    /// Catalog scenario to run
    #[arg(long, default_value = "turning_right_at_signal")]
    scenario: ScenarioKind,

    /// Print the catalog scenarios and exit
    #[arg(long)]
    list: bool,

    /// How many times to build and run the scenario
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    repetitions: u32,

    /// Master seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Jitter the scenario's speeds from the seed
    #[arg(long)]
    randomize: bool,

    /// Timeout in simulated seconds (default: the scenario's own)
    #[arg(long)]
    timeout: Option<f32>,

    /// Simulated seconds per tick
    #[arg(long, default_value_t = 0.05)]
    tick: f32,

    /// Directory for the CSV output
    #[arg(long, default_value = "output/junction_turn")]
    output: PathBuf,

    /// Spawn CSV (default: the built-in ego/other pair)
    #[arg(long)]
    spawns: Option<PathBuf>,
}

impl Cli {
    /// Seed for run `rep`.  Randomized runs each draw from their own seed.
    fn run_seed(&self, rep: u32) -> u64 {
        if self.randomize { self.seed.wrapping_add(rep as u64) } else { self.seed }
    }

    /// Output directory for run `rep`; one subdirectory per run when
    /// repeating.
    fn run_output_dir(&self, rep: u32) -> PathBuf {
        if self.repetitions > 1 { self.output.join(format!("run_{rep:03}")) } else { self.output.clone() }
    }

    fn run_config(&self, rep: u32) -> ScenarioConfig {
        ScenarioConfig {
            tick_duration_secs:      self.tick,
            timeout_secs:            self.timeout.unwrap_or(self.scenario.default_timeout_secs()),
            seed:                    self.run_seed(rep),
            randomize:               self.randomize,
            snapshot_interval_ticks: 1,
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    if cli.list {
        println!("Available scenarios:");
        for kind in ScenarioKind::ALL {
            println!("  {kind}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let spawns = match &cli.spawns {
        Some(path) => load_spawns_csv(path).with_context(|| format!("loading spawns from {}", path.display()))?,
        None => load_spawns_reader(Cursor::new(SPAWNS_CSV))?,
    };

    let mut passed = 0u32;
    for rep in 0..cli.repetitions {
        if run_once(&cli, &spawns, rep)? {
            passed += 1;
        }
    }
    if cli.repetitions > 1 {
        println!("{passed}/{} runs passed", cli.repetitions);
    }

    Ok(if passed == cli.repetitions { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Build and run the scenario once on a fresh world.  Returns whether the
/// run passed.
fn run_once(cli: &Cli, spawns: &[ActorSpawn], rep: u32) -> Result<bool> {
    // 1. Actors.
    let actors = ActorStoreBuilder::from_spawns(spawns.iter().copied()).build();
    let roles = ScenarioActors::from_roles(&actors)?;
    info!(rep, actors = actors.count, ego = %roles.ego, other = %roles.other, "actors spawned");

    // 2. World and scenario.
    let world = junction::build_world(actors);
    let config = cli.run_config(rep);
    let mut scenario = cli
        .scenario
        .build(world, roles, config.clone())
        .with_context(|| format!("building {}", cli.scenario))?;

    // 3. Output.
    let output = cli.run_output_dir(rep);
    let writer = CsvWriter::new(&output)?;
    let mut obs = ScenarioOutputObserver::new(writer, &config);

    // 4. Run.
    let t0 = Instant::now();
    let outcome = scenario.run(&mut obs)?;
    info!(rep, seed = config.seed, %outcome, wall_ms = t0.elapsed().as_millis() as u64, "run complete");
    if let Some(e) = obs.take_error() {
        warn!(error = %e, "CSV output is incomplete");
    }

    // 5. Summary.
    let report = scenario.report().context("scenario ended without a report")?;
    println!("{report}");
    println!("{:<12} {:>9} {:>9} {:>8} {:>7}", "actor", "x", "y", "speed", "hits");
    let actors = scenario.sim().actors();
    for id in actors.actor_ids() {
        let Some(state) = actors.state(id) else { continue };
        println!(
            "{:<12} {:>9.2} {:>9.2} {:>8.2} {:>7}",
            id.to_string(),
            state.location.x,
            state.location.y,
            state.speed,
            state.collisions,
        );
    }
    println!("output written to {}", output.display());

    Ok(report.passed())
}
