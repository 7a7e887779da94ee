//! Engine error type

use thiserror::Error;

use crate::cards::Card;
use crate::situation::Side;

/// Errors raised while running a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{side} played {card}, which is not in its hand")]
    IllegalPlay { side: Side, card: Card },

    #[error("cannot resolve a round: the game is already over")]
    ResolutionAfterCompletion,

    #[error("cannot resolve a round before its mission has been drawn")]
    MissionNotDrawn,

    #[error("mission order must be a permutation of 1..=16, got {0:?}")]
    InvalidMissionOrder(Vec<Card>),

    #[error("player {name} is no longer available")]
    PlayerUnavailable { name: String },
}
