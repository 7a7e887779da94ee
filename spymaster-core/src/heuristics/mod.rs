//! Heuristic strategies
//!
//! Hand-written players used as reference opponents and sparring partners.
//! They are built explicitly from a `Strategy` value; there are no shared
//! global instances.
//!
//! - CHINA: random card
//! - FRANCE / BRITAIN: aim a little above the mission
//! - AMERICA: aim above the mission, adjusting after each defeat
//! - RUSSIA: mission-banded tactics with bluffing (see `russia`)

mod russia;

pub use russia::RussiaPlayer;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::aim::{aim, chuck, DEFAULT_CUTOFF};
use crate::cards::{Card, ASSASSIN};
use crate::error::GameError;
use crate::player::{Agent, Player};
use crate::situation::{MissionResult, Situation};

/// Parameters of a heuristic player
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Strategy {
    /// Uniformly random held card
    Random,
    /// Aim at mission + U[1, variance]
    SimpleAiming { variance: u8 },
    /// Aim at mission + diff + 1, learning `diff` from defeats
    America,
    /// Banded tactics; probabilities of stabbing, fearing the assassin, and
    /// bailing out to a middling card
    Russia {
        stabbiness: f64,
        paranoia: f64,
        idleness: f64,
    },
}

/// Named strategy presets
pub const STRATEGY_NAMES: [&str; 5] = ["russia", "america", "britain", "france", "china"];

impl Strategy {
    pub fn china() -> Self {
        Strategy::Random
    }

    pub fn france() -> Self {
        Strategy::SimpleAiming { variance: 2 }
    }

    pub fn britain() -> Self {
        Strategy::SimpleAiming { variance: 4 }
    }

    pub fn america() -> Self {
        Strategy::America
    }

    pub fn russia() -> Self {
        Strategy::Russia {
            stabbiness: 0.5,
            paranoia: 0.5,
            idleness: 0.33,
        }
    }

    /// Look up a preset by name (case-insensitive)
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "china" => Some(Self::china()),
            "france" => Some(Self::france()),
            "britain" => Some(Self::britain()),
            "america" => Some(Self::america()),
            "russia" => Some(Self::russia()),
            _ => None,
        }
    }

    /// Every preset, as named agents
    pub fn roster() -> Vec<HeuristicAgent> {
        STRATEGY_NAMES
            .iter()
            .filter_map(|name| HeuristicAgent::named(name))
            .collect()
    }

    /// Build a player following this strategy
    pub fn build(&self, name: &str, seed: u64) -> Box<dyn Player> {
        let name = name.to_string();
        let rng = ChaCha8Rng::seed_from_u64(seed);
        match *self {
            Strategy::Random => Box::new(RandomPlayer { name, rng }),
            Strategy::SimpleAiming { variance } => Box::new(SimpleAimingPlayer {
                name,
                variance: variance.max(1),
                rng,
            }),
            Strategy::America => Box::new(AmericaPlayer::new(name, rng)),
            Strategy::Russia {
                stabbiness,
                paranoia,
                idleness,
            } => Box::new(RussiaPlayer::new(name, stabbiness, paranoia, idleness, rng)),
        }
    }
}

/// A named strategy that can be instantiated once per game
#[derive(Clone, Debug, PartialEq)]
pub struct HeuristicAgent {
    pub name: String,
    pub strategy: Strategy,
}

impl HeuristicAgent {
    pub fn new(name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }

    /// Agent for a named preset, e.g. "russia"
    pub fn named(name: &str) -> Option<Self> {
        let strategy = Strategy::by_name(name)?;
        let mut display = name.to_ascii_lowercase();
        if let Some(first) = display.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        Some(Self::new(display, strategy))
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn instantiate(&self, seed: u64) -> Box<dyn Player> {
        self.strategy.build(&self.name, seed)
    }
}

// ============================================================================
// PLAYERS
// ============================================================================

/// Plays a uniformly random held card
pub struct RandomPlayer {
    name: String,
    rng: ChaCha8Rng,
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn pick(&mut self, situation: &Situation) -> Result<Card, GameError> {
        let cards: Vec<Card> = situation.your_cards.into();
        if cards.is_empty() {
            return Ok(ASSASSIN);
        }
        Ok(cards[self.rng.gen_range(0..cards.len())])
    }
}

/// Aims a few points above each mission
pub struct SimpleAimingPlayer {
    name: String,
    variance: u8,
    rng: ChaCha8Rng,
}

impl Player for SimpleAimingPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn pick(&mut self, situation: &Situation) -> Result<Card, GameError> {
        let target = situation.mission() + self.rng.gen_range(1..=self.variance);
        let hand = situation.your_cards;
        Ok(aim(hand, target, DEFAULT_CUTOFF, &mut self.rng)
            .unwrap_or_else(|| chuck(hand, &mut self.rng)))
    }
}

/// Aims above the mission and widens its margin after being outbid
pub struct AmericaPlayer {
    name: String,
    diff: Card,
    rng: ChaCha8Rng,
}

impl AmericaPlayer {
    fn new(name: String, mut rng: ChaCha8Rng) -> Self {
        let diff = rng.gen_range(0..=2);
        Self { name, diff, rng }
    }
}

impl Player for AmericaPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn pick(&mut self, situation: &Situation) -> Result<Card, GameError> {
        let target = situation.mission() + self.diff + 1;
        let hand = situation.your_cards;
        Ok(aim(hand, target, DEFAULT_CUTOFF, &mut self.rng)
            .unwrap_or_else(|| chuck(hand, &mut self.rng)))
    }

    fn receive(&mut self, _situation: &Situation, result: &MissionResult) {
        if result.opp_played >= result.you_played {
            self.diff = result.opp_played - result.you_played;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{play_game, GameState};

    #[test]
    fn test_by_name() {
        assert_eq!(Strategy::by_name("France"), Some(Strategy::SimpleAiming { variance: 2 }));
        assert_eq!(Strategy::by_name("china"), Some(Strategy::Random));
        assert!(Strategy::by_name("atlantis").is_none());
    }

    #[test]
    fn test_roster_names() {
        let roster = Strategy::roster();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster[0].name, "Russia");
        assert_eq!(roster[4].name, "China");
    }

    #[test]
    fn test_every_pairing_completes() {
        let roster = Strategy::roster();
        let mut seed = 0u64;
        for white in &roster {
            for black in &roster {
                seed += 1;
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let mut w = white.instantiate(seed * 2);
                let mut b = black.instantiate(seed * 2 + 1);
                let record = play_game(GameState::new(&mut rng), &mut *w, &mut *b).unwrap();
                assert_eq!(record.rounds.len(), 16);
            }
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        let agent = HeuristicAgent::named("britain").unwrap();
        let play = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut w = agent.instantiate(seed);
            let mut b = agent.instantiate(seed + 1);
            play_game(GameState::new(&mut rng), &mut *w, &mut *b).unwrap()
        };
        let a = play(10);
        let b = play(10);
        assert_eq!(a.rounds, b.rounds);
    }

    #[test]
    fn test_america_adjusts_after_defeat() {
        let mut player = AmericaPlayer::new("America".into(), ChaCha8Rng::seed_from_u64(0));
        let situation =
            GameState::new(&mut ChaCha8Rng::seed_from_u64(0)).situation(crate::Side::White);
        let result = MissionResult {
            you_played: 4,
            opp_played: 9,
            you_scored: 0,
            opp_scored: 6,
            mission: 6,
            game_over: false,
        };
        player.receive(&situation, &result);
        assert_eq!(player.diff, 5);

        let win = MissionResult {
            you_played: 12,
            opp_played: 3,
            ..result
        };
        player.receive(&situation, &win);
        assert_eq!(player.diff, 5);
    }

    #[test]
    fn test_simple_aiming_plays_exact_target_range() {
        let mut player = SimpleAimingPlayer {
            name: "France".into(),
            variance: 2,
            rng: ChaCha8Rng::seed_from_u64(4),
        };
        let mut state = GameState::with_mission_order(&(1..=16).rev().collect::<Vec<_>>()).unwrap();
        state.begin_round().unwrap();
        // full hand, mission 16: target 17 or 18 collapses to 0 or 15
        for _ in 0..20 {
            let card = player.pick(&state.situation(crate::Side::White)).unwrap();
            assert!(card == 0 || card == 15);
        }
        let mut state = GameState::with_mission_order(&(1..=16).collect::<Vec<_>>()).unwrap();
        state.begin_round().unwrap();
        for _ in 0..20 {
            let card = player.pick(&state.situation(crate::Side::White)).unwrap();
            assert!(card == 2 || card == 3);
        }
    }
}
