use std::path::PathBuf;

use clap::Parser;

use hanabi_bench::config::{BenchmarkConfig, ResolvedOutputs};
use hanabi_bench::logging::init_logging;
use hanabi_bench::tournament::TournamentRunner;

/// Batch runner for Hanabi agents.
#[derive(Debug, Parser)]
#[command(
    name = "hanabi-bench",
    author,
    version,
    about = "Deterministic Hanabi agent benchmark"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games each agent plays.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deck shuffles.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the hidden-state samples per candidate move for every sampling agent.
    #[arg(long, value_name = "COUNT")]
    samples: Option<usize>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let agent_count = config.agents.len();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let players = config.games.players;

    println!(
        "Loaded configuration '{run_id}' with {agent_count} agent{} ({games} games, {players} players)",
        if agent_count == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let mut runner = TournamentRunner::new(config, outputs)?;
    if let Some(samples) = cli.samples {
        anyhow::ensure!(samples > 0, "--samples must be greater than zero");
        runner = runner.with_samples(samples);
    }

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} games × {} agents → {} rows at {}",
        summary.games_played,
        summary.agents,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
