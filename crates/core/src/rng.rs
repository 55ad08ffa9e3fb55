//! RNG module - the game's injectable random source
//!
//! Piece selection draws from a seedable ChaCha8 generator owned by the
//! [`GameState`](crate::GameState). Passing a fixed seed reproduces the exact
//! piece sequence, which is what the tests and the `--seed` option rely on.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::Tetromino;

/// Random generator used for piece selection.
pub type GameRng = ChaCha8Rng;

/// Create a deterministic generator from a seed.
pub fn seeded(seed: u64) -> GameRng {
    GameRng::seed_from_u64(seed)
}

/// Pick one of the seven playable variants uniformly.
pub fn random_variant<R: Rng + ?Sized>(rng: &mut R) -> Tetromino {
    Tetromino::PLAYABLE[rng.random_range(0..Tetromino::PLAYABLE.len())]
}
