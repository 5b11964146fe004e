//! Entropy fer the data generator.
//!
//! The generator never reaches fer a global RNG; it's handed a
//! [`RandomSource`] so tests can pin the output doon.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Shuffle in place, every permutation equally likely.
    fn shuffle(&mut self, values: &mut [i32]);

    /// One value drawn fae the full `i32` range.
    fn next_value(&mut self) -> i32;
}

/// `StdRng` seeded once, either fae a fixed seed or the clock.
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    rng: StdRng,
}

impl SeededSource {
    pub fn with_seed(seed: u64) -> Self {
        SeededSource {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_clock() -> Self {
        Self::with_seed(clock_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn shuffle(&mut self, values: &mut [i32]) {
        values.shuffle(&mut self.rng);
    }

    fn next_value(&mut self) -> i32 {
        self.rng.gen()
    }
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SeededSource::with_seed(42);
        let mut b = SeededSource::with_seed(42);
        let xs: Vec<i32> = (0..8).map(|_| a.next_value()).collect();
        let ys: Vec<i32> = (0..8).map(|_| b.next_value()).collect();
        assert_eq!(xs, ys);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut source = SeededSource::with_seed(7);
        let mut values: Vec<i32> = (1..=100).collect();
        source.shuffle(&mut values);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=100).collect::<Vec<_>>());
    }
}
