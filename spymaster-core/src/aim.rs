//! Strategy primitives
//!
//! Small pure functions that compute one candidate card from visible state.
//! `None` means "no option", which is distinct from the assassin (0).
//! Randomness is always passed in by the caller.

use rand::Rng;

use crate::cards::{Card, CardSet, ASSASSIN, HIGHEST_CARD};

/// Targets above this count as "high" in `aim`
pub const DEFAULT_CUTOFF: Card = 6;

/// First candidate that is not `None`.
///
/// Candidates are passed as an already-evaluated slice, so every one of them
/// has been computed (and has drawn its randomness) before selection.
pub fn prefer(candidates: &[Option<Card>]) -> Option<Card> {
    candidates.iter().flatten().next().copied()
}

/// Smallest held card strictly above `target`
pub fn aim_high(options: CardSet, target: Card) -> Option<Card> {
    options.min_where(|c| c > target)
}

/// Largest held card strictly below `target`
pub fn aim_low(options: CardSet, target: Card) -> Option<Card> {
    options.max_where(|c| c < target)
}

/// Play as close to `target` as possible.
///
/// An exact match wins. A target above the highest rank is first collapsed
/// to either the assassin or the general at random. Then high targets
/// (above `cutoff`) try just-above before just-below, low targets the other
/// way round, and any held card is the last resort. Returns `None` only for
/// an empty hand.
pub fn aim<R: Rng + ?Sized>(
    options: CardSet,
    target: Card,
    cutoff: Card,
    rng: &mut R,
) -> Option<Card> {
    if options.contains(target) {
        return Some(target);
    }

    let target = if target > HIGHEST_CARD {
        if rng.gen_bool(0.5) {
            HIGHEST_CARD
        } else {
            ASSASSIN
        }
    } else {
        target
    };
    if options.contains(target) {
        return Some(target);
    }

    let high = aim_high(options, target);
    let low = aim_low(options, target);
    if target > cutoff {
        prefer(&[high, low, options.min()])
    } else {
        prefer(&[low, high, options.min()])
    }
}

/// Try to win within `[low, high]`: our smallest card in the range that
/// beats their best card in the range. With nothing of theirs in range the
/// bar is `low` itself.
pub fn mx(mine: CardSet, theirs: CardSet, low: Card, high: Card) -> Option<Card> {
    let their_best = theirs.in_range(low, high).max().unwrap_or(low);
    mine.min_where(|c| c > their_best && c <= high)
}

/// Throw away a low card.
///
/// Prefers the smallest card at or above a random floor in 1..=4, then the
/// smallest non-assassin, and only then the assassin.
pub fn chuck<R: Rng + ?Sized>(mine: CardSet, rng: &mut R) -> Card {
    let floor: Card = rng.gen_range(1..=4);
    prefer(&[
        mine.min_where(|c| c >= floor),
        mine.min_where(|c| c > ASSASSIN),
        Some(ASSASSIN),
    ])
    .unwrap_or(ASSASSIN)
}
