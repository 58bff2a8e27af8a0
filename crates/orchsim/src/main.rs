//! Orchsim - in-memory orchestrator simulator
//!
//! ## Usage
//!
//! ```bash
//! # Walk a controller through create/stop/start/remove
//! orchsim --host-id host-A demo
//!
//! # Replay a scenario file, stopping at the first unexpected outcome
//! orchsim --config sim.json replay scenario.json --fail-fast
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr and are
//! controlled with `RUST_LOG`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use orchsim::{OrchSim, Scenario, SimulatorConfig, StepOutcome};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Orchsim: in-memory orchestrator simulator
#[derive(Parser)]
#[command(name = "orchsim")]
#[command(about = "In-memory orchestrator simulator for instance lifecycle testing", long_about = None)]
struct Cli {
    /// Host identity of the simulator (overrides the config file)
    #[arg(long, global = true)]
    host_id: Option<String>,

    /// Simulator config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in controller restart walkthrough
    Demo,

    /// Replay a scenario file against a fresh simulator
    Replay {
        /// Scenario file (JSON)
        file: PathBuf,

        /// Stop at the first step whose outcome differs from its expectation
        #[arg(long)]
        fail_fast: bool,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<SimulatorConfig> {
    let config = match &cli.config {
        Some(path) => SimulatorConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimulatorConfig::default(),
    };
    Ok(config.with_overrides(cli.host_id.clone())?)
}

fn print_outcomes(outcomes: &[StepOutcome], pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(outcomes)?
    } else {
        serde_json::to_string(outcomes)?
    };
    println!("{}", json);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orchsim=info,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(host_id = %config.host_id, "Starting orchestrator simulator");
    let sim = OrchSim::with_config(config);

    let outcomes = match &cli.command {
        Commands::Demo => Scenario::demo().run(&sim, true)?,
        Commands::Replay { file, fail_fast } => {
            let scenario = Scenario::from_file(file)
                .with_context(|| format!("failed to load scenario {}", file.display()))?;
            scenario.run(&sim, *fail_fast)?
        }
    };

    let unexpected = outcomes.iter().filter(|o| !o.as_expected).count();
    info!(
        steps = outcomes.len(),
        unexpected,
        instances = sim.instance_count(),
        "Scenario complete"
    );
    print_outcomes(&outcomes, cli.pretty)
}
