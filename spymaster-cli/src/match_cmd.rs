//! Match command - play games between two players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_agent(), play_match(), report_results()
//! - Level 3: compute_statistics()
//! - Level 4: formatting utilities

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use rand::Rng;
use serde::Serialize;

use spymaster_core::{Agent, GameRecord, HeuristicAgent, Side};
use spymaster_evolve::{Genome, PerceptronAgent};
use spymaster_tournament::{play_pairings, Pairing};

use crate::evolve::ChampionRecord;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// White player: strategy name or genome/champion JSON file
    pub white: String,

    /// Black player: strategy name or genome/champion JSON file
    pub black: String,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Aggregated match results, from White's point of view
#[derive(Clone, Debug, Default, Serialize)]
struct MatchResults {
    white: String,
    black: String,
    white_wins: usize,
    black_wins: usize,
    draws: usize,
    failed: usize,
    white_points: u64,
    black_points: u64,
    avg_differential: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// This function reads like a table of contents:
/// 1. Build both agents
/// 2. Play the match (multiple games)
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let white = load_agent(&args.white)?;
    let black = load_agent(&args.black)?;

    tracing::info!(
        "Starting match: {} vs {} ({} games)",
        white.name(),
        black.name(),
        args.games
    );

    let base_seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    let results = play_match(white.as_ref(), black.as_ref(), args.games, base_seed);

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Strategy name, or a path to a saved genome
fn load_agent(source: &str) -> Result<Box<dyn Agent>> {
    if let Some(agent) = HeuristicAgent::named(source) {
        return Ok(Box::new(agent));
    }

    let genome = load_genome(Path::new(source))
        .with_context(|| format!("'{}' is neither a strategy nor a genome file", source))?;
    Ok(Box::new(PerceptronAgent::new(genome)))
}

/// Play all games in the match
fn play_match(white: &dyn Agent, black: &dyn Agent, games: usize, base_seed: u64) -> MatchResults {
    let seats = [white, black];
    let pairings: Vec<Pairing> = (0..games)
        .map(|k| Pairing {
            white: 0,
            black: 1,
            seed: base_seed.wrapping_add(k as u64),
        })
        .collect();

    let records: Vec<Option<GameRecord>> = play_pairings(&seats, &pairings, true)
        .into_iter()
        .enumerate()
        .map(|(k, outcome)| match outcome.result {
            Ok(record) => {
                tracing::info!(
                    "Game {}: {}-{}",
                    k + 1,
                    record.white_score,
                    record.black_score
                );
                Some(record)
            }
            Err(e) => {
                tracing::warn!("Game {} failed: {}", k + 1, e);
                None
            }
        })
        .collect();

    compute_statistics(white.name(), black.name(), &records)
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn compute_statistics(white: &str, black: &str, records: &[Option<GameRecord>]) -> MatchResults {
    let mut results = MatchResults {
        white: white.to_string(),
        black: black.to_string(),
        ..Default::default()
    };
    let mut differential = 0i64;

    for record in records {
        let Some(record) = record else {
            results.failed += 1;
            continue;
        };
        match record.winner() {
            Some(Side::White) => results.white_wins += 1,
            Some(Side::Black) => results.black_wins += 1,
            None => results.draws += 1,
        }
        results.white_points += record.white_score as u64;
        results.black_points += record.black_score as u64;
        differential += record.differential(Side::White);
    }

    let completed = records.len() - results.failed;
    if completed > 0 {
        results.avg_differential = differential as f32 / completed as f32;
    }
    results
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Load a bare genome, or the genome inside a `champion.json`
fn load_genome(path: &Path) -> Result<Genome> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if let Ok(genome) = serde_json::from_str::<Genome>(&json) {
        return Ok(genome);
    }
    let champion: ChampionRecord =
        serde_json::from_str(&json).context("Not a genome or champion file")?;
    Ok(champion.genome)
}

fn print_text_results(results: &MatchResults) {
    println!("\n=== Match Results ===");
    println!("{} (White) vs {} (Black)", results.white, results.black);
    println!(
        "White wins: {}  Black wins: {}  Draws: {}",
        results.white_wins, results.black_wins, results.draws
    );
    println!(
        "Points: {} - {} (avg differential {:+.2})",
        results.white_points, results.black_points, results.avg_differential
    );
    if results.failed > 0 {
        println!("Failed games: {}", results.failed);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_load_agent_by_name() {
        let agent = load_agent("britain").unwrap();
        assert_eq!(agent.name(), "Britain");
        assert!(load_agent("no-such-player.json").is_err());
    }

    #[test]
    fn test_load_agent_from_genome_file() {
        let genome = Genome::random(&mut ChaCha8Rng::seed_from_u64(3));
        let path = std::env::temp_dir()
            .join(format!("spymaster-match-{}.json", std::process::id()));
        genome.save(&path).unwrap();

        let agent = load_agent(path.to_str().unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(agent.name(), PerceptronAgent::new(genome).name());
    }

    #[test]
    fn test_play_match_counts() {
        let white = HeuristicAgent::named("russia").unwrap();
        let black = HeuristicAgent::named("china").unwrap();
        let results = play_match(&white, &black, 8, 11);

        assert_eq!(results.white_wins + results.black_wins + results.draws, 8);
        assert_eq!(results.failed, 0);
        assert_eq!(results.white, "Russia");

        let again = play_match(&white, &black, 8, 11);
        assert_eq!(results.white_points, again.white_points);
    }

    #[test]
    fn test_compute_statistics() {
        let record = |w: u32, b: u32| GameRecord {
            white_name: "W".into(),
            black_name: "B".into(),
            white_score: w,
            black_score: b,
            rounds: Vec::new(),
        };
        let records = vec![Some(record(50, 30)), Some(record(20, 20)), None, Some(record(10, 40))];
        let results = compute_statistics("W", "B", &records);

        assert_eq!(results.white_wins, 1);
        assert_eq!(results.black_wins, 1);
        assert_eq!(results.draws, 1);
        assert_eq!(results.failed, 1);
        assert_eq!(results.white_points, 80);
        assert!((results.avg_differential - (-10.0 / 3.0)).abs() < 1e-5);
    }
}
