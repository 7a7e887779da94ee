//! Player and Agent capabilities
//!
//! The engine only ever talks to `Player`. Tournaments only ever hold
//! `Agent`s, and ask each one for a fresh `Player` per game so that no
//! per-game state is shared between games running in parallel.

use crate::cards::Card;
use crate::error::GameError;
use crate::situation::{MissionResult, Situation};

/// Anything that can sit at the table and play cards
pub trait Player: Send {
    /// Display name
    fn name(&self) -> &str;

    /// Choose a card from `situation.your_cards`
    fn pick(&mut self, situation: &Situation) -> Result<Card, GameError>;

    /// Notification after each round. The default ignores it.
    fn receive(&mut self, _situation: &Situation, _result: &MissionResult) {}

    /// Called when `pick` returned a card that is not in hand.
    ///
    /// Return true to be prompted again. Computer players choose from their
    /// own hand by construction, so for them an illegal pick is a bug and the
    /// default ends the game with `GameError::IllegalPlay`.
    fn warn_illegal_pick(&mut self, _situation: &Situation, card: Card) -> bool {
        tracing::error!(player = self.name(), card, "illegal pick from a computer player");
        false
    }
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn pick(&mut self, situation: &Situation) -> Result<Card, GameError> {
        (**self).pick(situation)
    }

    fn receive(&mut self, situation: &Situation, result: &MissionResult) {
        (**self).receive(situation, result)
    }

    fn warn_illegal_pick(&mut self, situation: &Situation, card: Card) -> bool {
        (**self).warn_illegal_pick(situation, card)
    }
}

/// A reusable description of a player that can be instantiated per game
pub trait Agent: Sync {
    fn name(&self) -> &str;

    /// Build a game-private player. `seed` drives any randomness it uses.
    fn instantiate(&self, seed: u64) -> Box<dyn Player>;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn instantiate(&self, seed: u64) -> Box<dyn Player> {
        (**self).instantiate(seed)
    }
}
