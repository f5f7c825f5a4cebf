//! Deterministic dice for attack resolution.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls
//! - **Serializable**: O(1) state capture and restore, so a saved battle
//!   replays the same rolls after loading
//!
//! ```
//! use hex_tactics::core::GameRng;
//!
//! let mut rng = GameRng::new(7);
//! let roll = rng.roll_dice(2, 6);
//! assert!((2..=12).contains(&roll));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded dice roller.
///
/// Uses ChaCha8 for speed and a stable, platform-independent sequence.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Roll `count` dice with `sides` faces each and return the total.
    ///
    /// Panics if `sides` is zero.
    pub fn roll_dice(&mut self, count: u32, sides: u32) -> i32 {
        assert!(sides > 0, "A die needs at least one side");
        (0..count)
            .map(|_| self.inner.gen_range(1..=sides) as i32)
            .sum()
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for save files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
