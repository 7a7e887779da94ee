//! Spymaster CLI - Command-line interface
//!
//! Commands:
//! - evolve: Train a population of perceptron players
//! - match: Play a series of games between two players

mod evolve;
mod match_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use evolve::EvolveArgs;
use match_cmd::MatchArgs;

#[derive(Parser)]
#[command(name = "spymaster")]
#[command(version, about = "Spymaster card game and evolutionary trainer")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve perceptron players
    Evolve(EvolveArgs),
    /// Play games between two players (strategy names or genome files)
    Match(MatchArgs),
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evolve(args) => evolve::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}

/// Log to stderr at `info` unless RUST_LOG says otherwise
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
