//! Spymaster Tournament - Fitness evaluation through game playing
//!
//! This crate provides tournament infrastructure:
//! - Single seeded games between agents
//! - Round-robin and versus-reference formats
//! - Failure-isolating fitness aggregation
//! - A population-level fitness monitor
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_tournament (orchestration)
//! - Level 2: pairings, play_pairings, aggregate_fitness (phases)
//! - Level 3: run_game (steps)
//! - Level 4: configuration

mod config;
mod fitness;
mod game_runner;
mod match_play;
mod tournament;

pub use config::{ReferenceScoring, TournamentConfig, TournamentFormat};
pub use fitness::{aggregate_fitness, evaluate_population};
pub use game_runner::run_game;
pub use match_play::{play_pairings, reference_pairings, round_robin_pairings, GameOutcome, Pairing};
pub use tournament::{run_tournament, FailedGame, TournamentResult};
