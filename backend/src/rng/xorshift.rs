//! xorshift64* random number generator
//!
//! Fast, high-quality PRNG suitable for simulation: 64-bit state, 64-bit
//! output, passes BigCrush. Same seed, same sequence, which is what makes
//! arcade spawn sequences reproducible from a recorded session seed.

use serde::{Deserialize, Serialize};

/// Seeded deterministic random number generator.
///
/// # Example
/// ```
/// use wellbeing_sim_core_rs::GameRng;
///
/// let mut rng = GameRng::new(42);
/// let roll = rng.unit_f64();          // [0.0, 1.0)
/// let x = rng.range_f64(20.0, 780.0); // [20.0, 780.0)
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    /// Create a new RNG from a seed.
    ///
    /// A zero seed is remapped to 1 (xorshift state must be non-zero).
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Next raw 64-bit value, advancing the internal state.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform f64 in [0.0, 1.0).
    pub fn unit_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform f64 in [min, max).
    ///
    /// # Panics
    /// Panics if min >= max.
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        assert!(min < max, "min must be less than max");
        min + self.unit_f64() * (max - min)
    }

    /// True with probability `p` (clamped to [0, 1]).
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit_f64() < p.clamp(0.0, 1.0)
    }

    /// Current state, for checkpointing or seeding a replay.
    pub fn state(&self) -> u64 {
        self.state
    }
}
