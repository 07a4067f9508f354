//! Rope-pulling contest runner.
//!
//! Loads a match configuration (JSON file or the classic defaults),
//! wires up the monitors, runs the full simulation, and prints the
//! final scoreboard.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tug_core::{run_match_with_strategy, CallUpStrategy, MatchConfig, MatchSummary};

#[derive(Parser)]
#[command(name = "tug_cli")]
#[command(about = "Simulate a two-team rope-pulling match", long_about = None)]
struct Cli {
    /// Match configuration JSON file. Defaults to the classic contest.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the strength-sampling seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override games per match.
    #[arg(long)]
    games: Option<u32>,

    /// Override trials per game.
    #[arg(long)]
    trials: Option<u32>,

    /// How each coach picks its pullers.
    #[arg(long, value_enum, default_value_t = StrategyArg::Strongest)]
    strategy: StrategyArg,

    /// Print the summary as JSON instead of text.
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Strongest,
    BenchOrder,
    Random,
}

impl From<StrategyArg> for CallUpStrategy {
    fn from(arg: StrategyArg) -> CallUpStrategy {
        match arg {
            StrategyArg::Strongest => CallUpStrategy::Strongest,
            StrategyArg::BenchOrder => CallUpStrategy::BenchOrder,
            StrategyArg::Random => CallUpStrategy::Random,
        }
    }
}

fn load_config(path: &Path) -> Result<MatchConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: MatchConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn print_report(summary: &MatchSummary) {
    for (index, game) in summary.games.iter().enumerate() {
        let verdict = match game.winner {
            Some(side) => format!("{side} wins"),
            None => "drawn".to_owned(),
        };
        println!(
            "game {:>2}: home {} x {} away  ({verdict})",
            index + 1,
            game.trial_wins[0],
            game.trial_wins[1],
        );
    }
    println!("trials played: {}", summary.trials_played);
    match summary.champion() {
        Some(side) => println!("match winner: {side}"),
        None => println!("match drawn"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => MatchConfig::classic(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(games) = cli.games {
        config.games_per_match = games;
    }
    if let Some(trials) = cli.trials {
        config.trials_per_game = trials;
    }

    log::info!(
        "starting match: {} games of {} trials, teams of {}",
        config.games_per_match,
        config.trials_per_game,
        config.team_size
    );
    let summary = run_match_with_strategy(&config, cli.strategy.into())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_report(&summary);
    }
    Ok(())
}
