//! Single-layer perceptron player
//!
//! Scores every card as the dot product of its genome row with the feature
//! vector of the current situation and plays the best-scoring held card.

use std::sync::Arc;

use rand::Rng;
use spymaster_core::{Agent, Card, GameError, Player, Situation, ASSASSIN, HIGHEST_CARD};

use crate::error::GenomeError;
use crate::genome::{Genome, FEATURES, MISSION_FEATURE, SCORE_FEATURE};
use crate::mutation::mutate_genome;
use crate::naming::agent_name;

const OPP_HAND_OFFSET: usize = 16;
const MISSIONS_OFFSET: usize = 32;

// ============================================================================
// FEATURES
// ============================================================================

/// Encode a situation as the 51 perceptron inputs.
///
/// Remaining mission `m` (1..=16) sets column `32 + m - 1`, so the mission
/// bits never overlap the current-mission column.
pub fn features(situation: &Situation) -> [f32; FEATURES] {
    let mut vec = [0.0f32; FEATURES];
    for card in situation.your_cards.iter() {
        vec[card as usize] = 1.0;
    }
    for card in situation.opponents_cards.iter() {
        vec[OPP_HAND_OFFSET + card as usize] = 1.0;
    }
    for mission in situation.remaining_missions.iter() {
        vec[MISSIONS_OFFSET + mission as usize - 1] = 1.0;
    }
    vec[MISSION_FEATURE] = situation.mission() as f32;
    vec[SCORE_FEATURE] = situation.your_score as f32;
    vec[SCORE_FEATURE + 1] = situation.opp_score as f32;
    vec
}

/// Held card with the highest score; ties go to the lowest card
pub fn best_card(genome: &Genome, situation: &Situation) -> Option<Card> {
    let inputs = features(situation);
    let mut best: Option<(Card, f32)> = None;

    for card in 0..=HIGHEST_CARD {
        // Unheld cards score -inf and can never win
        if !situation.your_cards.contains(card) {
            continue;
        }
        let score: f32 = genome
            .row(card)
            .iter()
            .zip(inputs.iter())
            .map(|(w, x)| w * x)
            .sum();
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((card, score)),
        }
    }

    best.map(|(card, _)| card)
}

// ============================================================================
// PLAYER / AGENT
// ============================================================================

/// Per-game perceptron player. Stateless apart from its shared genome.
pub struct PerceptronPlayer {
    name: String,
    genome: Arc<Genome>,
}

impl Player for PerceptronPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn pick(&mut self, situation: &Situation) -> Result<Card, GameError> {
        // An empty hand is never offered by the engine; the assassin then
        // surfaces as an illegal pick rather than a panic.
        Ok(best_card(&self.genome, situation).unwrap_or(ASSASSIN))
    }
}

/// Immutable evolved agent. Cloning shares the genome.
#[derive(Clone, Debug)]
pub struct PerceptronAgent {
    name: String,
    genome: Arc<Genome>,
}

impl PerceptronAgent {
    /// Agent named after its genome's codename
    pub fn new(genome: Genome) -> Self {
        Self {
            name: agent_name(&genome),
            genome: Arc::new(genome),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(Genome::random(rng))
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// New agent whose genome is this one plus N(0, rate) noise
    pub fn create_offspring<R: Rng + ?Sized>(
        &self,
        rate: f32,
        rng: &mut R,
    ) -> Result<Self, GenomeError> {
        Ok(Self::new(mutate_genome(&self.genome, rate, rng)?))
    }
}

impl Agent for PerceptronAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn instantiate(&self, _seed: u64) -> Box<dyn Player> {
        Box::new(PerceptronPlayer {
            name: self.name.clone(),
            genome: Arc::clone(&self.genome),
        })
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
    use spymaster_core::{play_game, CardSet, GameState, Strategy};

    fn situation(mine: &[Card], theirs: &[Card], mission: Card) -> Situation {
        let remaining: CardSet = (1..=16).filter(|m| *m != mission).collect();
        Situation {
            your_cards: mine.iter().copied().collect(),
            opponents_cards: theirs.iter().copied().collect(),
            your_score: 5,
            opp_score: 9,
            current_mission: Some(mission),
            remaining_missions: remaining,
        }
    }

    #[test]
    fn test_feature_layout() {
        let f = features(&situation(&[0, 15], &[3], 16));
        assert_eq!(f[0], 1.0);
        assert_eq!(f[15], 1.0);
        assert_eq!(f[1], 0.0);
        assert_eq!(f[16 + 3], 1.0);
        // missions 1..=15 remain, mission 16 is current
        assert!(f[32..47].iter().all(|x| *x == 1.0));
        assert_eq!(f[47], 0.0);
        assert_eq!(f[48], 16.0);
        assert_eq!(f[49], 5.0);
        assert_eq!(f[50], 9.0);
    }

    #[test]
    fn test_picks_highest_scoring_held_card() {
        let mut genome = Genome::zeros();
        genome.set(3, MISSION_FEATURE, 1.0);
        genome.set(9, MISSION_FEATURE, 2.0);
        // card 12 would win but is not held
        genome.set(12, MISSION_FEATURE, 10.0);

        let s = situation(&[1, 3, 9], &[], 4);
        assert_eq!(best_card(&genome, &s), Some(9));
    }

    #[test]
    fn test_ties_go_to_lowest_card() {
        let genome = Genome::zeros();
        let s = situation(&[4, 7, 11], &[], 2);
        assert_eq!(best_card(&genome, &s), Some(4));
    }

    #[test]
    fn test_negative_scores_still_pick_a_held_card() {
        let mut genome = Genome::zeros();
        for card in 0..=HIGHEST_CARD {
            genome.set(card, MISSION_FEATURE, -(card as f32) - 1.0);
        }
        let s = situation(&[6, 10], &[], 8);
        assert_eq!(best_card(&genome, &s), Some(6));
        assert_eq!(best_card(&genome, &situation(&[], &[], 8)), None);
    }

    #[test]
    fn test_offspring_is_a_new_agent() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let parent = PerceptronAgent::random(&mut rng);
        let child = parent.create_offspring(0.1, &mut rng).unwrap();
        assert_ne!(parent.genome(), child.genome());

        let clone = parent.create_offspring(0.0, &mut rng).unwrap();
        assert_eq!(parent.genome(), clone.genome());
        assert_eq!(parent.name(), clone.name());
    }

    #[test]
    fn test_evolved_players_finish_games() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let white = PerceptronAgent::random(&mut rng);
        let black = PerceptronAgent::random(&mut rng);
        let mut w = white.instantiate(0);
        let mut b = black.instantiate(1);
        let record = play_game(GameState::new(&mut rng), &mut *w, &mut *b).unwrap();
        assert_eq!(record.rounds.len(), 16);

        let mut reference = Strategy::russia().build("Russia", 3);
        let mut w = white.instantiate(2);
        let record = play_game(GameState::new(&mut rng), &mut *w, &mut *reference).unwrap();
        assert_eq!(record.rounds.len(), 16);
    }
}
