//! Per-side views of a game: what a player sees and what it is told

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardSet};

/// Which seat a player occupies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Read-only snapshot of the game from one side's point of view.
///
/// Both hands are visible; only the order of future missions and the
/// opponent's pick for this round are hidden.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Situation {
    pub your_cards: CardSet,
    pub opponents_cards: CardSet,
    pub your_score: u32,
    pub opp_score: u32,
    /// Mission at stake this round (None before the first draw)
    pub current_mission: Option<Card>,
    /// Missions not yet drawn, excluding the current one
    pub remaining_missions: CardSet,
}

impl Situation {
    /// The same snapshot seen from the other seat
    pub fn flipped(&self) -> Self {
        Self {
            your_cards: self.opponents_cards,
            opponents_cards: self.your_cards,
            your_score: self.opp_score,
            opp_score: self.your_score,
            current_mission: self.current_mission,
            remaining_missions: self.remaining_missions,
        }
    }

    /// Current mission value, 0 before the first draw
    pub fn mission(&self) -> Card {
        self.current_mission.unwrap_or(0)
    }
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yours: Vec<Card> = self.your_cards.into();
        let theirs: Vec<Card> = self.opponents_cards.into();
        let missions: Vec<Card> = self.remaining_missions.into();
        writeln!(f, "Your cards: {:?}", yours)?;
        writeln!(f, "Opponent's cards: {:?}", theirs)?;
        writeln!(f, "Score: {} - {}", self.your_score, self.opp_score)?;
        match self.current_mission {
            Some(m) => writeln!(f, "Mission: {}", m)?,
            None => writeln!(f, "Mission: -")?,
        }
        write!(f, "Remaining missions: {:?}", missions)
    }
}

/// Outcome of one round, from the receiving side's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionResult {
    pub you_played: Card,
    pub opp_played: Card,
    pub you_scored: u32,
    pub opp_scored: u32,
    pub mission: Card,
    /// Set on the final round, once both hands are empty
    pub game_over: bool,
}

impl MissionResult {
    /// The same result seen from the other seat
    pub fn flipped(&self) -> Self {
        Self {
            you_played: self.opp_played,
            opp_played: self.you_played,
            you_scored: self.opp_scored,
            opp_scored: self.you_scored,
            mission: self.mission,
            game_over: self.game_over,
        }
    }
}

impl fmt::Display for MissionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You played {}, they played {}", self.you_played, self.opp_played)?;
        if self.you_scored > 0 {
            write!(f, "; you scored {}", self.you_scored)
        } else if self.opp_scored > 0 {
            write!(f, "; opponent scored {}", self.opp_scored)
        } else {
            write!(f, "; drawn round")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Situation {
        Situation {
            your_cards: [0, 1, 2].into_iter().collect(),
            opponents_cards: [3, 4].into_iter().collect(),
            your_score: 5,
            opp_score: 9,
            current_mission: Some(12),
            remaining_missions: [1, 16].into_iter().collect(),
        }
    }

    #[test]
    fn test_situation_flip() {
        let s = sample();
        let f = s.flipped();
        assert_eq!(f.your_cards, s.opponents_cards);
        assert_eq!(f.opponents_cards, s.your_cards);
        assert_eq!(f.your_score, 9);
        assert_eq!(f.opp_score, 5);
        assert_eq!(f.current_mission, Some(12));
        assert_eq!(f.flipped(), s);
    }

    #[test]
    fn test_result_flip() {
        let r = MissionResult {
            you_played: 0,
            opp_played: 9,
            you_scored: 9,
            opp_scored: 0,
            mission: 12,
            game_over: false,
        };
        let f = r.flipped();
        assert_eq!(f.you_played, 9);
        assert_eq!(f.opp_played, 0);
        assert_eq!(f.you_scored, 0);
        assert_eq!(f.opp_scored, 9);
        assert_eq!(f.mission, 12);
    }

    #[test]
    fn test_situation_json_uses_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["yourCards"], serde_json::json!([0, 1, 2]));
        assert_eq!(json["currentMission"], serde_json::json!(12));
        assert_eq!(json["remainingMissions"], serde_json::json!([1, 16]));
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::Black.to_string(), "Black");
    }
}
