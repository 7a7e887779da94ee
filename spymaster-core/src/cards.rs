//! Card values and compact card sets

use serde::{Deserialize, Serialize};

/// A card or mission value. Cards are 0..=15, missions are 1..=16.
pub type Card = u8;

/// The assassin card
pub const ASSASSIN: Card = 0;

/// Highest card rank (the general)
pub const HIGHEST_CARD: Card = 15;

/// Highest mission value
pub const HIGHEST_MISSION: Card = 16;

/// Number of cards in a starting hand, and number of rounds in a game
pub const HAND_SIZE: usize = 16;

/// Set of card (or mission) values in 0..=16, stored as a bit mask.
///
/// Iteration is always ascending, which keeps every strategy built on top
/// of it deterministic for a given random stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Card>", try_from = "Vec<Card>")]
pub struct CardSet(u32);

impl CardSet {
    /// Empty set
    pub const fn empty() -> Self {
        CardSet(0)
    }

    /// A fresh hand: every card 0..=15
    pub const fn full_hand() -> Self {
        CardSet(0xFFFF)
    }

    /// Every mission value 1..=16
    pub const fn all_missions() -> Self {
        CardSet(0x1_FFFE)
    }

    pub fn contains(&self, card: Card) -> bool {
        card <= HIGHEST_MISSION && self.0 & (1 << card) != 0
    }

    /// Insert a value, returning false if it is out of range
    pub fn insert(&mut self, card: Card) -> bool {
        if card > HIGHEST_MISSION {
            return false;
        }
        self.0 |= 1 << card;
        true
    }

    /// Remove a value, returning whether it was present
    pub fn remove(&mut self, card: Card) -> bool {
        let present = self.contains(card);
        if present {
            self.0 &= !(1 << card);
        }
        present
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Smallest value in the set
    pub fn min(&self) -> Option<Card> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as Card)
        }
    }

    /// Largest value in the set
    pub fn max(&self) -> Option<Card> {
        if self.0 == 0 {
            None
        } else {
            Some((31 - self.0.leading_zeros()) as Card)
        }
    }

    /// Ascending iterator over the values
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        (0..=HIGHEST_MISSION).filter(move |&c| self.contains(c))
    }

    /// Subset of values in `[low, high]`
    pub fn in_range(&self, low: Card, high: Card) -> CardSet {
        let mut out = CardSet::empty();
        for card in self.iter().filter(|&c| c >= low && c <= high) {
            out.insert(card);
        }
        out
    }

    /// Smallest value satisfying `pred`
    pub fn min_where(&self, pred: impl Fn(Card) -> bool) -> Option<Card> {
        self.iter().find(|&c| pred(c))
    }

    /// Largest value satisfying `pred`
    pub fn max_where(&self, pred: impl Fn(Card) -> bool) -> Option<Card> {
        self.iter().filter(|&c| pred(c)).last()
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::empty();
        for card in iter {
            set.insert(card);
        }
        set
    }
}

impl From<CardSet> for Vec<Card> {
    fn from(set: CardSet) -> Self {
        set.iter().collect()
    }
}

impl TryFrom<Vec<Card>> for CardSet {
    type Error = String;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        let mut set = CardSet::empty();
        for card in cards {
            if !set.insert(card) {
                return Err(format!("card value out of range: {}", card));
            }
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_hand() {
        let hand = CardSet::full_hand();
        assert_eq!(hand.len(), HAND_SIZE);
        assert!(hand.contains(ASSASSIN));
        assert!(hand.contains(HIGHEST_CARD));
        assert!(!hand.contains(HIGHEST_MISSION));
        assert_eq!(hand.min(), Some(0));
        assert_eq!(hand.max(), Some(15));
    }

    #[test]
    fn test_all_missions() {
        let missions = CardSet::all_missions();
        assert_eq!(missions.len(), 16);
        assert!(!missions.contains(0));
        assert!(missions.contains(16));
        assert_eq!(missions.min(), Some(1));
        assert_eq!(missions.max(), Some(16));
    }

    #[test]
    fn test_insert_remove() {
        let mut set = CardSet::empty();
        assert!(set.is_empty());
        assert!(set.insert(7));
        assert!(!set.insert(17));
        assert!(set.contains(7));
        assert!(set.remove(7));
        assert!(!set.remove(7));
        assert!(set.is_empty());
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_range_queries() {
        let set: CardSet = [0, 3, 5, 9, 12].into_iter().collect();
        assert_eq!(set.in_range(3, 9).iter().collect::<Vec<_>>(), vec![3, 5, 9]);
        assert_eq!(set.min_where(|c| c > 4), Some(5));
        assert_eq!(set.max_where(|c| c < 9), Some(5));
        assert_eq!(set.max_where(|c| c > 12), None);
    }

    #[test]
    fn test_serializes_as_sorted_list() {
        let set: CardSet = [9, 0, 4].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[0,4,9]");

        let back: CardSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert!(serde_json::from_str::<CardSet>("[1,40]").is_err());
    }
}
