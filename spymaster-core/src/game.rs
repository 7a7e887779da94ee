//! Round-resolution engine
//!
//! A game is sixteen rounds. Each round draws one mission, both sides
//! commit a card without seeing the other's choice, and the round is
//! resolved only once both picks are in.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardSet, ASSASSIN, HAND_SIZE, HIGHEST_MISSION};
use crate::error::GameError;
use crate::player::Player;
use crate::situation::{MissionResult, Side, Situation};

// ============================================================================
// SCORING
// ============================================================================

/// Points gained by (white, black) for one round.
///
/// - equal cards: stand-off, nobody scores
/// - one assassin against a non-zero card `v`: the assassin's side gains `v`
/// - otherwise the higher card gains the mission value
pub fn score_round(white: Card, black: Card, mission: Card) -> (u32, u32) {
    if white == black {
        (0, 0)
    } else if white == ASSASSIN {
        (black as u32, 0)
    } else if black == ASSASSIN {
        (0, white as u32)
    } else if white > black {
        (mission as u32, 0)
    } else {
        (0, mission as u32)
    }
}

// ============================================================================
// MISSION POOL
// ============================================================================

/// Missions in draw order, consumed front to back
#[derive(Clone, Debug)]
struct MissionPool {
    order: Vec<Card>,
    next: usize,
}

impl MissionPool {
    fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut order: Vec<Card> = (1..=HIGHEST_MISSION).collect();
        order.shuffle(rng);
        Self { order, next: 0 }
    }

    fn from_order(order: &[Card]) -> Result<Self, GameError> {
        let set: CardSet = order.iter().copied().collect();
        if order.len() != HAND_SIZE || set != CardSet::all_missions() {
            return Err(GameError::InvalidMissionOrder(order.to_vec()));
        }
        Ok(Self {
            order: order.to_vec(),
            next: 0,
        })
    }

    fn draw(&mut self) -> Option<Card> {
        let mission = self.order.get(self.next).copied()?;
        self.next += 1;
        Some(mission)
    }

    fn remaining(&self) -> CardSet {
        self.order[self.next..].iter().copied().collect()
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Engine lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    Done,
}

/// Full mutable state of one game. Players only ever see `Situation`s.
#[derive(Clone, Debug)]
pub struct GameState {
    white_hand: CardSet,
    black_hand: CardSet,
    white_score: u32,
    black_score: u32,
    missions: MissionPool,
    current_mission: Option<Card>,
    phase: Phase,
    rounds_played: usize,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New game with the mission pool shuffled once up front
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_pool(MissionPool::shuffled(rng))
    }

    /// New game with a fixed mission order (first element drawn first)
    pub fn with_mission_order(order: &[Card]) -> Result<Self, GameError> {
        Ok(Self::with_pool(MissionPool::from_order(order)?))
    }

    fn with_pool(missions: MissionPool) -> Self {
        Self {
            white_hand: CardSet::full_hand(),
            black_hand: CardSet::full_hand(),
            white_score: 0,
            black_score: 0,
            missions,
            current_mission: None,
            phase: Phase::Active,
            rounds_played: 0,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn hand(&self, side: Side) -> CardSet {
        match side {
            Side::White => self.white_hand,
            Side::Black => self.black_hand,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::White => self.white_score,
            Side::Black => self.black_score,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn current_mission(&self) -> Option<Card> {
        self.current_mission
    }

    /// Missions not yet drawn
    pub fn remaining_missions(&self) -> CardSet {
        self.missions.remaining()
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    /// Snapshot of the game as `side` sees it
    pub fn situation(&self, side: Side) -> Situation {
        let white = Situation {
            your_cards: self.white_hand,
            opponents_cards: self.black_hand,
            your_score: self.white_score,
            opp_score: self.black_score,
            current_mission: self.current_mission,
            remaining_missions: self.missions.remaining(),
        };
        match side {
            Side::White => white,
            Side::Black => white.flipped(),
        }
    }

    // ========================================================================
    // ROUND TRANSITIONS
    // ========================================================================

    /// Draw this round's mission. Calling it again before `resolve` returns
    /// the same mission.
    pub fn begin_round(&mut self) -> Result<Card, GameError> {
        if self.phase == Phase::Done {
            return Err(GameError::ResolutionAfterCompletion);
        }
        if let Some(mission) = self.current_mission {
            return Ok(mission);
        }
        // Hands and missions shrink in lock-step, so an Active game always
        // has a mission left to draw.
        let mission = self
            .missions
            .draw()
            .ok_or(GameError::ResolutionAfterCompletion)?;
        self.current_mission = Some(mission);
        Ok(mission)
    }

    /// Resolve the current round. Returns the result from White's side.
    ///
    /// Both cards are validated before anything is mutated, so a rejected
    /// play leaves the state untouched.
    pub fn resolve(&mut self, white: Card, black: Card) -> Result<MissionResult, GameError> {
        if self.phase == Phase::Done {
            return Err(GameError::ResolutionAfterCompletion);
        }
        let mission = self.current_mission.ok_or(GameError::MissionNotDrawn)?;

        if !self.white_hand.contains(white) {
            return Err(GameError::IllegalPlay {
                side: Side::White,
                card: white,
            });
        }
        if !self.black_hand.contains(black) {
            return Err(GameError::IllegalPlay {
                side: Side::Black,
                card: black,
            });
        }

        self.white_hand.remove(white);
        self.black_hand.remove(black);

        let (dw, db) = score_round(white, black, mission);
        self.white_score += dw;
        self.black_score += db;

        self.current_mission = None;
        self.rounds_played += 1;

        let game_over = self.white_hand.is_empty();
        if game_over {
            self.phase = Phase::Done;
        }

        Ok(MissionResult {
            you_played: white,
            opp_played: black,
            you_scored: dw,
            opp_scored: db,
            mission,
            game_over,
        })
    }
}

// ============================================================================
// GAME RECORD
// ============================================================================

/// One resolved round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub mission: Card,
    pub white_card: Card,
    pub black_card: Card,
    pub white_scored: u32,
    pub black_scored: u32,
}

/// A completed game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    pub white_name: String,
    pub black_name: String,
    pub white_score: u32,
    pub black_score: u32,
    pub rounds: Vec<RoundRecord>,
}

impl GameRecord {
    /// Winning side (None for a draw)
    pub fn winner(&self) -> Option<Side> {
        match self.white_score.cmp(&self.black_score) {
            std::cmp::Ordering::Greater => Some(Side::White),
            std::cmp::Ordering::Less => Some(Side::Black),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::White => self.white_score,
            Side::Black => self.black_score,
        }
    }

    /// Own score minus opponent's score
    pub fn differential(&self, side: Side) -> i64 {
        self.score(side) as i64 - self.score(side.opponent()) as i64
    }

    /// 1 for a win, 0.5 for a draw, 0 for a loss
    pub fn points(&self, side: Side) -> f32 {
        match self.winner() {
            Some(w) if w == side => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        }
    }
}

// ============================================================================
// GAME LOOP
// ============================================================================

/// Play `state` to completion.
///
/// Each round the two picks run concurrently and are joined before the
/// round is resolved. Results are delivered mirrored, so each player sees
/// itself as "you".
pub fn play_game(
    mut state: GameState,
    white: &mut dyn Player,
    black: &mut dyn Player,
) -> Result<GameRecord, GameError> {
    let mut rounds = Vec::with_capacity(HAND_SIZE);

    while !state.is_over() {
        let mission = state.begin_round()?;
        let white_view = state.situation(Side::White);
        let black_view = white_view.flipped();

        let (white_card, black_card) = rayon::join(
            || pick_legal(&mut *white, &white_view, Side::White),
            || pick_legal(&mut *black, &black_view, Side::Black),
        );
        let result = state.resolve(white_card?, black_card?)?;

        let after = state.situation(Side::White);
        white.receive(&after, &result);
        black.receive(&after.flipped(), &result.flipped());

        rounds.push(RoundRecord {
            mission,
            white_card: result.you_played,
            black_card: result.opp_played,
            white_scored: result.you_scored,
            black_scored: result.opp_scored,
        });
    }

    Ok(GameRecord {
        white_name: white.name().to_string(),
        black_name: black.name().to_string(),
        white_score: state.score(Side::White),
        black_score: state.score(Side::Black),
        rounds,
    })
}

/// Ask `player` for a card until it returns one it holds, or gives up
fn pick_legal(
    player: &mut dyn Player,
    situation: &Situation,
    side: Side,
) -> Result<Card, GameError> {
    loop {
        let card = player.pick(situation)?;
        if situation.your_cards.contains(card) {
            return Ok(card);
        }
        if !player.warn_illegal_pick(situation, card) {
            return Err(GameError::IllegalPlay { side, card });
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
