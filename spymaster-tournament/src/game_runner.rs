//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use spymaster_core::{play_game, Agent, GameError, GameRecord, GameState};

/// Play one game between fresh players built from two agents.
///
/// `seed` fixes the mission order and both players' randomness, so a game
/// replays identically no matter which thread runs it.
pub fn run_game(white: &dyn Agent, black: &dyn Agent, seed: u64) -> Result<GameRecord, GameError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut white_player = white.instantiate(rng.gen());
    let mut black_player = black.instantiate(rng.gen());
    let state = GameState::new(&mut rng);

    let record = play_game(state, &mut *white_player, &mut *black_player)?;
    tracing::debug!(
        white = %record.white_name,
        black = %record.black_name,
        white_score = record.white_score,
        black_score = record.black_score,
        seed,
        "game finished"
    );
    Ok(record)
}
