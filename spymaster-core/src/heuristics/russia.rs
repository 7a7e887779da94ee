//! RUSSIA: mission-banded tactics
//!
//! - missions 1-4: win cheaply within [p, p+4], otherwise discard
//! - missions 5-8: win cheaply within [p, p+3], otherwise aim just above
//! - missions 9-12: as above with a tighter band, but may stab with the assassin
//! - missions 13-16: fight for 13-15 or stab; second-guess a high card when
//!   the opponent still holds the assassin, and sometimes bail out entirely

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::aim::{aim, chuck, mx, prefer, DEFAULT_CUTOFF};
use crate::cards::{Card, ASSASSIN};
use crate::error::GameError;
use crate::player::Player;
use crate::situation::Situation;

/// Cards above this are the ones worth protecting from the assassin
const HIGH_CARD: Card = 13;

pub struct RussiaPlayer {
    name: String,
    stabbiness: f64,
    paranoia: f64,
    idleness: f64,
    rng: ChaCha8Rng,
}

impl RussiaPlayer {
    pub fn new(
        name: String,
        stabbiness: f64,
        paranoia: f64,
        idleness: f64,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            name,
            stabbiness,
            paranoia,
            idleness,
            rng,
        }
    }

    fn check(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }

    fn aim_between(&mut self, situation: &Situation, low: Card, high: Card) -> Option<Card> {
        let target = self.rng.gen_range(low..=high);
        aim(situation.your_cards, target, DEFAULT_CUTOFF, &mut self.rng)
    }

    fn stab(&mut self, situation: &Situation) -> Option<Card> {
        if situation.your_cards.contains(ASSASSIN) && self.check(self.stabbiness) {
            Some(ASSASSIN)
        } else {
            None
        }
    }

    fn choose(&mut self, situation: &Situation) -> Option<Card> {
        let p = situation.mission();
        let mine = situation.your_cards;
        let theirs = situation.opponents_cards;

        if p < 5 {
            let discard = chuck(mine, &mut self.rng);
            prefer(&[mx(mine, theirs, p, p + 4), Some(discard)])
        } else if p < 9 {
            let above = self.aim_between(situation, p + 1, p + 3);
            prefer(&[mx(mine, theirs, p, p + 3), above])
        } else if p < 13 {
            let stab = self.stab(situation);
            let above = self.aim_between(situation, p + 1, p + 2);
            prefer(&[mx(mine, theirs, p, p + 2), stab, above])
        } else {
            let stab = self.stab(situation);
            let above = self.aim_between(situation, p, 16);
            let mut choice = prefer(&[mx(mine, theirs, 13, 15), stab, above])?;

            if choice > HIGH_CARD && theirs.contains(ASSASSIN) && self.check(self.paranoia) {
                choice = chuck(mine, &mut self.rng);
            }
            if choice > HIGH_CARD && self.check(self.idleness) {
                choice = self.aim_between(situation, 5, 7).unwrap_or(choice);
            }
            Some(choice)
        }
    }
}

impl Player for RussiaPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn pick(&mut self, situation: &Situation) -> Result<Card, GameError> {
        let choice = self.choose(situation);
        Ok(choice.unwrap_or_else(|| chuck(situation.your_cards, &mut self.rng)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardSet;
    use rand::SeedableRng;

    fn russia(stabbiness: f64, paranoia: f64, idleness: f64) -> RussiaPlayer {
        RussiaPlayer::new(
            "Russia".into(),
            stabbiness,
            paranoia,
            idleness,
            ChaCha8Rng::seed_from_u64(42),
        )
    }

    fn situation(mine: &[Card], theirs: &[Card], mission: Card) -> Situation {
        Situation {
            your_cards: mine.iter().copied().collect(),
            opponents_cards: theirs.iter().copied().collect(),
            your_score: 0,
            opp_score: 0,
            current_mission: Some(mission),
            remaining_missions: CardSet::empty(),
        }
    }

    #[test]
    fn test_low_mission_wins_cheaply() {
        let mut player = russia(0.5, 0.5, 0.33);
        // their best in [3, 7] is 5; our cheapest winner is 6
        let s = situation(&[0, 2, 6, 7, 12], &[1, 5, 9], 3);
        for _ in 0..20 {
            assert_eq!(player.pick(&s).unwrap(), 6);
        }
    }

    #[test]
    fn test_low_mission_discards_when_outgunned() {
        let mut player = russia(0.5, 0.5, 0.33);
        let s = situation(&[0, 5, 10], &[7], 3);
        for _ in 0..20 {
            assert_eq!(player.pick(&s).unwrap(), 5);
        }
    }

    #[test]
    fn test_always_stabs_when_certain() {
        let mut player = russia(1.0, 0.0, 0.0);
        // nothing of ours beats their 12 within [10, 12]
        let s = situation(&[0, 3, 15], &[12], 10);
        assert_eq!(player.pick(&s).unwrap(), ASSASSIN);
    }

    #[test]
    fn test_paranoid_about_assassin() {
        let mut player = russia(0.0, 1.0, 0.0);
        // 15 would be the natural pick for mission 16, but they hold the assassin
        let s = situation(&[1, 4, 15], &[0, 14], 16);
        let card = player.pick(&s).unwrap();
        assert!(card == 1 || card == 4);
    }

    #[test]
    fn test_picks_are_always_held() {
        let mut player = russia(0.5, 0.5, 0.33);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..500 {
            let mine: CardSet = (0..=15u8).filter(|_| rng.gen_bool(0.4)).collect();
            if mine.is_empty() {
                continue;
            }
            let theirs: CardSet = (0..=15u8).filter(|_| rng.gen_bool(0.4)).collect();
            let s = Situation {
                your_cards: mine,
                opponents_cards: theirs,
                your_score: 0,
                opp_score: 0,
                current_mission: Some(rng.gen_range(1..=16)),
                remaining_missions: CardSet::empty(),
            };
            assert!(mine.contains(player.pick(&s).unwrap()));
        }
    }
}
