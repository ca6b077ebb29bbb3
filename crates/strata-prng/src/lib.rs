//! Random sources for strata.
//!
//! Node heights in a skip list are drawn from a geometric distribution. The
//! structure never reaches for a global generator; it owns a [`RandomSource`]
//! handed to it at construction, so a fixed seed (or a fixed script of draws)
//! makes every run reproducible.

use std::collections::VecDeque;

use rand::prelude::IndexedRandom;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Draw the next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// A seeded pseudo-random number generator backed by [`rand::rngs::StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: rand::rngs::StdRng,
}

impl SeededRng {
    /// Create a new seeded RNG from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }

    /// Create a new RNG from a seed array.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: rand::rngs::StdRng::from_seed(seed),
        }
    }

    /// Create a new RNG seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: rand::rngs::StdRng::from_os_rng(),
        }
    }

    /// Generate a random integer in the inclusive range `[min, max]`.
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        self.rng.random_range(min..=max)
    }

    /// Generate a random floating-point number in `[0, 1)`.
    pub fn float(&mut self) -> f64 {
        self.rng.random()
    }

    /// Generate a random boolean.
    pub fn bool(&mut self) -> bool {
        self.rng.random()
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.rng);
    }

    /// Pick a random element from a slice.
    pub fn pick<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.rng)
    }

    /// Reset the RNG to the initial state of `seed`.
    pub fn reset(&mut self, seed: u64) {
        self.rng = rand::rngs::StdRng::seed_from_u64(seed);
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        self.float()
    }
}

/// Generate a deterministic random sequence for testing.
pub fn deterministic_seq(seed: u64, count: usize) -> Vec<u32> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random()).collect()
}

/// Simple linear congruential generator (LCG) for fast, simple PRNG needs.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
    multiplier: u64,
    increment: u64,
    modulus: u64,
}

impl Lcg {
    /// Create a new LCG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed,
            multiplier: 6364136223846793005,
            increment: 1442695040888963407,
            modulus: u64::MAX,
        }
    }

    /// Create a new LCG with custom parameters. A zero modulus is treated as `u64::MAX`.
    pub fn with_params(seed: u64, multiplier: u64, increment: u64, modulus: u64) -> Self {
        Self {
            state: seed,
            multiplier,
            increment,
            modulus: if modulus == 0 { u64::MAX } else { modulus },
        }
    }

    /// Generate the next raw value.
    pub fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(self.multiplier)
            .wrapping_add(self.increment)
            % self.modulus;
        self.state
    }

    /// Generate a value in the inclusive range `[min, max]`.
    pub fn range(&mut self, min: u64, max: u64) -> u64 {
        let span = max.saturating_sub(min).saturating_add(1);
        min + (self.next() % span)
    }

    /// Generate a float in `[0, 1)` from the top 53 bits of the next value.
    pub fn float(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Reset the generator with a new seed.
    pub fn reset(&mut self, seed: u64) {
        self.state = seed;
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl RandomSource for Lcg {
    fn next_f64(&mut self) -> f64 {
        self.float()
    }
}

/// Replays a scripted list of draws, then keeps returning `fallback`.
///
/// Useful for pinning node heights: with probability `p`, a draw below `p`
/// is a promotion and a draw at or above it ends the trial.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    draws: VecDeque<f64>,
    fallback: f64,
}

impl FixedSequence {
    /// Replay `draws` in order, then return `0.999...` (never promotes).
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 1.0 - f64::EPSILON,
        }
    }

    /// Override the value returned once the script is exhausted.
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of scripted draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for FixedSequence {
    fn next_f64(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn seeded_rng_deterministic() {
        let mut rng1 = SeededRng::new(42);
        let mut rng2 = SeededRng::new(42);

        for _ in 0..10 {
            assert_eq!(rng1.range(1, 100), rng2.range(1, 100));
        }
    }

    #[test]
    fn seeded_rng_float_in_unit_interval() {
        let mut rng = SeededRng::new(42);
        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!((0.0..1.0).contains(&val));
        }
    }

    #[test]
    fn seeded_rng_reset() {
        let mut rng = SeededRng::new(42);
        let val1 = rng.float();
        rng.reset(42);
        let val2 = rng.float();
        assert_eq!(val1, val2);
    }

    #[test]
    fn seeded_rng_shuffle_keeps_elements() {
        let mut rng = SeededRng::new(7);
        let mut values: Vec<u32> = (1..=50).collect();
        rng.shuffle(&mut values);
        values.sort_unstable();
        assert_eq!(values, (1..=50).collect::<Vec<_>>());
    }

    #[test]
    fn seeded_rng_pick_empty() {
        let mut rng = SeededRng::new(42);
        let slice: [i32; 0] = [];
        assert!(rng.pick(&slice).is_none());
    }

    #[test]
    fn deterministic_seq_test() {
        assert_eq!(deterministic_seq(42, 5), deterministic_seq(42, 5));
    }

    #[test]
    fn lcg_deterministic() {
        let mut lcg1 = Lcg::new(42);
        let mut lcg2 = Lcg::new(42);

        for _ in 0..10 {
            assert_eq!(lcg1.next(), lcg2.next());
        }
    }

    #[test]
    fn lcg_reset() {
        let mut lcg = Lcg::new(42);
        let val1 = lcg.next();
        lcg.reset(42);
        assert_eq!(val1, lcg.next());
    }

    #[test]
    fn lcg_with_params() {
        let mut lcg = Lcg::with_params(42, 2, 3, 100);
        assert!(lcg.range(0, 99) <= 99);
    }

    #[test]
    fn lcg_default() {
        let mut lcg = Lcg::default();
        let mut lcg2 = Lcg::new(12345);
        assert_eq!(lcg.next(), lcg2.next());
    }

    #[test]
    fn fixed_sequence_replays_then_falls_back() {
        let mut seq = FixedSequence::new([0.1, 0.7]).with_fallback(0.25);
        assert_eq!(seq.remaining(), 2);
        assert_eq!(seq.next_f64(), 0.1);
        assert_eq!(seq.next_f64(), 0.7);
        assert_eq!(seq.next_f64(), 0.25);
        assert_eq!(seq.remaining(), 0);
    }

    #[test]
    fn borrowed_source_advances_owner() {
        fn draw<S: RandomSource>(mut source: S) -> f64 {
            source.next_f64()
        }

        let mut rng = SeededRng::new(3);
        let mut expected = SeededRng::new(3);
        assert_eq!(draw(&mut rng), expected.next_f64());
        assert_eq!(rng.next_f64(), expected.next_f64());
    }

    proptest! {
        #[test]
        fn prop_lcg_float_below_one(seed in any::<u64>()) {
            let mut lcg = Lcg::new(seed);
            for _ in 0..64 {
                let val = lcg.next_f64();
                prop_assert!((0.0..1.0).contains(&val));
            }
        }

        #[test]
        fn prop_lcg_range_bounds(seed in any::<u64>(), min in 0u64..1000, width in 0u64..1000) {
            let mut lcg = Lcg::new(seed);
            let val = lcg.range(min, min + width);
            prop_assert!(val >= min && val <= min + width);
        }
    }
}
