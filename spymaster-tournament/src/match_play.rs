//! Match scheduling - who plays whom, with which seed
//!
//! Level 2 - Phase-level implementation

use rayon::prelude::*;
use spymaster_core::{Agent, GameError, GameRecord};

use crate::game_runner::run_game;

/// One scheduled game. Indices point into the tournament's seat list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pairing {
    pub white: usize,
    pub black: usize,
    pub seed: u64,
}

/// A scheduled game and how it ended
#[derive(Debug)]
pub struct GameOutcome {
    pub pairing: Pairing,
    pub result: Result<GameRecord, GameError>,
}

/// Every ordered pair (i, j), i != j: n(n-1) games
pub fn round_robin_pairings(n: usize, base_seed: u64) -> Vec<Pairing> {
    let mut pairings = Vec::with_capacity(n * n.saturating_sub(1));
    for white in 0..n {
        for black in 0..n {
            if white == black {
                continue;
            }
            let seed = base_seed.wrapping_add(pairings.len() as u64);
            pairings.push(Pairing { white, black, seed });
        }
    }
    pairings
}

/// `games` games for each of the first `n` seats against seat `reference`
pub fn reference_pairings(
    n: usize,
    reference: usize,
    games: usize,
    base_seed: u64,
) -> Vec<Pairing> {
    (0..n)
        .flat_map(|white| (0..games).map(move |_| white))
        .enumerate()
        .map(|(k, white)| Pairing {
            white,
            black: reference,
            seed: base_seed.wrapping_add(k as u64),
        })
        .collect()
}

/// Play every pairing. Returns only after all games have finished.
pub fn play_pairings(
    seats: &[&dyn Agent],
    pairings: &[Pairing],
    parallel: bool,
) -> Vec<GameOutcome> {
    let play = |pairing: &Pairing| GameOutcome {
        pairing: *pairing,
        result: run_game(seats[pairing.white], seats[pairing.black], pairing.seed),
    };

    if parallel {
        pairings.par_iter().map(play).collect()
    } else {
        pairings.iter().map(play).collect()
    }
}
