//! Tournament execution - round-robin and versus-reference formats
//!
//! Level 1 - Orchestration and Level 2 - Phases

use spymaster_core::{Agent, GameError};

use crate::config::{ReferenceScoring, TournamentConfig, TournamentFormat};
use crate::fitness::aggregate_fitness;
use crate::match_play::{play_pairings, reference_pairings, round_robin_pairings, GameOutcome};

/// A game that ended in an error and was left out of the fitness
#[derive(Clone, Debug)]
pub struct FailedGame {
    pub white: String,
    pub black: String,
    pub seed: u64,
    pub error: GameError,
}

/// Result of a tournament
#[derive(Clone, Debug)]
pub struct TournamentResult {
    /// One entry per agent, in population order
    pub fitness: Vec<f32>,
    /// Games that ran to completion
    pub completed_games: usize,
    /// Games that failed
    pub failed_games: Vec<FailedGame>,
}

impl TournamentResult {
    /// Index and fitness of the best agent (first on ties)
    pub fn leader(&self) -> Option<(usize, f32)> {
        self.fitness
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, f)| match best {
                Some((_, top)) if f <= top => best,
                _ => Some((i, f)),
            })
    }

    pub fn total_games(&self) -> usize {
        self.completed_games + self.failed_games.len()
    }
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a tournament (Level 1 orchestration)
///
/// All games are launched together; the call returns once every game has
/// finished. A failing game is logged and excluded, never fatal.
pub fn run_tournament<A: Agent>(agents: &[A], config: &TournamentConfig) -> TournamentResult {
    let mut seats: Vec<&dyn Agent> = agents.iter().map(|a| a as &dyn Agent).collect();

    let (pairings, scoring) = match &config.format {
        TournamentFormat::RoundRobin => (
            round_robin_pairings(agents.len(), config.seed),
            ReferenceScoring::WinPoints,
        ),
        TournamentFormat::VersusReference {
            reference,
            games_per_agent,
            scoring,
        } => {
            seats.push(reference);
            (
                reference_pairings(agents.len(), agents.len(), *games_per_agent, config.seed),
                *scoring,
            )
        }
    };

    let outcomes = play_pairings(&seats, &pairings, config.parallel);
    summarize(&seats, agents.len(), &outcomes, scoring)
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

fn summarize(
    seats: &[&dyn Agent],
    n: usize,
    outcomes: &[GameOutcome],
    scoring: ReferenceScoring,
) -> TournamentResult {
    let fitness = aggregate_fitness(n, outcomes, scoring);
    let failed_games = collect_failures(seats, outcomes);
    let completed_games = outcomes.len() - failed_games.len();

    if !failed_games.is_empty() {
        tracing::warn!(
            failed = failed_games.len(),
            completed = completed_games,
            "games excluded from fitness"
        );
    }

    TournamentResult {
        fitness,
        completed_games,
        failed_games,
    }
}

fn collect_failures(seats: &[&dyn Agent], outcomes: &[GameOutcome]) -> Vec<FailedGame> {
    outcomes
        .iter()
        .filter_map(|outcome| {
            let error = outcome.result.as_ref().err()?;
            let failed = FailedGame {
                white: seats[outcome.pairing.white].name().to_string(),
                black: seats[outcome.pairing.black].name().to_string(),
                seed: outcome.pairing.seed,
                error: error.clone(),
            };
            tracing::warn!(
                white = %failed.white,
                black = %failed.black,
                seed = failed.seed,
                error = %failed.error,
                "game failed"
            );
            Some(failed)
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
