//! Injectable randomness for reward rolls.
//!
//! The variable-ratio bonus and loot rolls are the deliberate
//! unpredictability mechanism, so the random source is an explicit
//! dependency with a single uniform-draw method. Production callers use
//! [`ThreadRngSource`]; tests substitute [`SeededRng`] or [`SequenceRng`]
//! to make roll outcomes reproducible.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Source of uniform random draws in `[0, 1)`.
pub trait RewardRng {
    /// Next uniform sample in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Shuffle a slice in place (Fisher-Yates over uniform draws).
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = (self.next_f64() * (i + 1) as f64) as usize;
            items.swap(i, j.min(i));
        }
    }
}

/// Process-wide generator backed by the thread-local RNG.
///
/// Not cryptographic, but not predictable by the user, which is all the
/// reward schedule requires.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl RewardRng for ThreadRngSource {
    fn next_f64(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Seeded PCG generator for reproducible simulations.
#[derive(Debug, Clone)]
pub struct SeededRng(Pcg64);

impl SeededRng {
    /// Create a generator from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self(Pcg64::seed_from_u64(seed))
    }
}

impl RewardRng for SeededRng {
    fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Fixed-sequence generator for tests.
///
/// Yields the configured draws in order and repeats the final draw once the
/// sequence is exhausted.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    draws: Vec<f64>,
    index: usize,
}

impl SequenceRng {
    /// Create a generator that replays the given draws.
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, index: 0 }
    }
}

impl RewardRng for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let draw = self
            .draws
            .get(self.index)
            .or_else(|| self.draws.last())
            .copied()
            .unwrap_or(0.99);
        if self.index < self.draws.len() {
            self.index += 1;
        }
        draw
    }
}
