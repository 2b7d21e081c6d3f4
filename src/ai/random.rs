//! Injectable randomness for AI decisions
//!
//! Handlers never call a global RNG. They draw from a `RandomSource`, which is
//! seeded for real matches and scripted in tests.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform roll in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// `true` with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Deterministic generator for real matches
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Access the underlying generator (used by setup for range rolls)
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }
}

/// Replays a fixed sequence of rolls. Once the script runs out it keeps
/// returning the fallback roll and index 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    rolls: VecDeque<f64>,
    indices: VecDeque<usize>,
    fallback_roll: f64,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(mut self, rolls: &[f64]) -> Self {
        self.rolls.extend(rolls.iter().copied());
        self
    }

    pub fn with_indices(mut self, indices: &[usize]) -> Self {
        self.indices.extend(indices.iter().copied());
        self
    }

    /// Roll returned after the script is exhausted
    pub fn with_fallback(mut self, roll: f64) -> Self {
        self.fallback_roll = roll;
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback_roll)
    }

    fn index(&mut self, len: usize) -> usize {
        let idx = self.indices.pop_front().unwrap_or(0);
        idx.min(len.saturating_sub(1))
    }
}
