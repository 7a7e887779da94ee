//! Fitness aggregation
//!
//! Level 2 - Phase-level implementation
//!
//! Turns finished games into one number per agent. Failed games contribute
//! nothing to anyone.

use spymaster_core::{Agent, Side};

use crate::config::ReferenceScoring;
use crate::match_play::{play_pairings, reference_pairings, GameOutcome};

/// Fitness per agent, counting only completed games.
///
/// Seats at index `n` or above (the reference) are not scored. With
/// `ScoreDifferential` each side adds its own score minus the opponent's.
pub fn aggregate_fitness(
    n: usize,
    outcomes: &[GameOutcome],
    scoring: ReferenceScoring,
) -> Vec<f32> {
    let mut fitness = vec![0.0f32; n];

    for outcome in outcomes {
        let Ok(record) = &outcome.result else {
            continue;
        };
        let seats = [
            (outcome.pairing.white, Side::White),
            (outcome.pairing.black, Side::Black),
        ];
        for (seat, side) in seats {
            if seat >= n {
                continue;
            }
            fitness[seat] += match scoring {
                ReferenceScoring::WinPoints => record.points(side),
                ReferenceScoring::ScoreDifferential => record.differential(side) as f32,
            };
        }
    }

    fitness
}

/// Population-level fitness monitor: every agent plays one game as White
/// against `reference`; returns the total win points (1 / 0.5 / 0).
pub fn evaluate_population<A: Agent>(
    agents: &[A],
    reference: &dyn Agent,
    seed: u64,
    parallel: bool,
) -> f32 {
    let mut seats: Vec<&dyn Agent> = agents.iter().map(|a| a as &dyn Agent).collect();
    seats.push(reference);

    let pairings = reference_pairings(agents.len(), agents.len(), 1, seed);
    let outcomes = play_pairings(&seats, &pairings, parallel);

    aggregate_fitness(agents.len(), &outcomes, ReferenceScoring::WinPoints)
        .iter()
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_play::Pairing;
    use spymaster_core::{GameError, GameRecord, HeuristicAgent};

    fn record(white_score: u32, black_score: u32) -> GameRecord {
        GameRecord {
            white_name: "w".into(),
            black_name: "b".into(),
            white_score,
            black_score,
            rounds: Vec::new(),
        }
    }

    fn outcome(white: usize, black: usize, result: Result<GameRecord, GameError>) -> GameOutcome {
        GameOutcome {
            pairing: Pairing { white, black, seed: 0 },
            result,
        }
    }

    #[test]
    fn test_win_points() {
        let outcomes = vec![
            outcome(0, 1, Ok(record(40, 30))),
            outcome(1, 0, Ok(record(20, 20))),
        ];
        assert_eq!(aggregate_fitness(2, &outcomes, ReferenceScoring::WinPoints), vec![1.5, 0.5]);
    }

    #[test]
    fn test_differential_skips_reference_seat() {
        let outcomes = vec![
            outcome(0, 2, Ok(record(40, 30))),
            outcome(1, 2, Ok(record(10, 35))),
            outcome(1, 2, Ok(record(50, 0))),
        ];
        assert_eq!(
            aggregate_fitness(2, &outcomes, ReferenceScoring::ScoreDifferential),
            vec![10.0, 25.0]
        );
    }

    #[test]
    fn test_failed_games_ignored() {
        let outcomes = vec![
            outcome(0, 1, Ok(record(40, 30))),
            outcome(1, 0, Err(GameError::IllegalPlay { side: Side::White, card: 3 })),
        ];
        assert_eq!(aggregate_fitness(2, &outcomes, ReferenceScoring::WinPoints), vec![1.0, 0.0]);
    }

    #[test]
    fn test_evaluate_population_bounds() {
        let agents = vec![
            HeuristicAgent::named("china").unwrap(),
            HeuristicAgent::named("france").unwrap(),
            HeuristicAgent::named("america").unwrap(),
        ];
        let reference = HeuristicAgent::named("russia").unwrap();
        let total = evaluate_population(&agents, &reference, 5, true);
        assert!((0.0..=3.0).contains(&total));
        assert_eq!(total, evaluate_population(&agents, &reference, 5, false));
    }
}
