//! Shared helpers for the simulation tests

#![allow(dead_code)]

use std::sync::Arc;

use montecarlo::{Die, Face, Game};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG for repeatable plays
pub fn test_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A fair two-faced H/T die
pub fn coin() -> Arc<Die> {
    Arc::new(Die::new(["H", "T"]).expect("coin faces are distinct"))
}

/// Build a game from shared dice and play it with a seeded RNG
pub fn played_game(dice: Vec<Arc<Die>>, rolls: usize, seed: u64) -> Game {
    let mut game = Game::new(dice).expect("game needs dice");
    game.play_with(rolls, &mut test_rng(seed))
        .expect("play should succeed");
    game
}

pub fn faces<F: Into<Face> + Clone>(labels: &[F]) -> Vec<Face> {
    labels.iter().cloned().map(Into::into).collect()
}

/// C(n, k) for small values
pub fn choose(n: usize, k: usize) -> usize {
    (1..=k).fold(1, |acc, i| acc * (n - k + i) / i)
}
