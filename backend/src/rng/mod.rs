//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm. CRITICAL: all randomness in the engine
//! MUST go through this module so that a recorded seed replays an identical
//! spawn sequence.

mod xorshift;

pub use xorshift::GameRng;
