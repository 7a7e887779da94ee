//! Spymaster Core - Game engine and heuristic players
//!
//! This crate provides the core game logic for Spymaster:
//! - Card and mission primitives (`CardSet` bitset)
//! - Per-side situations and round results
//! - The round-resolution engine and game loop
//! - Aiming helpers shared by the scripted strategies
//! - Heuristic players and the channel-driven external player

pub mod aim;
pub mod cards;
pub mod error;
pub mod external;
pub mod game;
pub mod heuristics;
pub mod player;
pub mod situation;

// Re-exports for convenient access
pub use cards::{Card, CardSet, ASSASSIN, HAND_SIZE, HIGHEST_CARD, HIGHEST_MISSION};
pub use error::GameError;
pub use external::{channel_player, ChannelHandle, ChannelPlayer, Prompt};
pub use game::{play_game, score_round, GameRecord, GameState, Phase, RoundRecord};
pub use heuristics::{HeuristicAgent, Strategy, STRATEGY_NAMES};
pub use player::{Agent, Player};
pub use situation::{MissionResult, Side, Situation};
