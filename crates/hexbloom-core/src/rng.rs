//! Random sources for dealing, shuffling and puzzle generation.
//!
//! Every random decision in the engine goes through [`RandomSource`], a stream
//! of `[0, 1)` floats. Derived draws are always `floor(next * len)` so that a
//! seeded stream produces the same picks on every platform.
//!
//! Two implementations are provided:
//! - [`DailyRng`]: a 32-bit LCG, used for the date-seeded daily puzzle
//! - [`EntropyRng`]: an adapter over any `rand` generator, used in endless mode

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A stream of uniformly distributed floats in `[0, 1)`.
pub trait RandomSource {
    /// Next value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let index = (self.next_f64() * len as f64).floor() as usize;
        // Guard against a source returning exactly 1.0
        index.min(len.saturating_sub(1))
    }

    /// Fisher-Yates shuffle walking from the last index down.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.pick_index(i + 1);
            items.swap(i, j);
        }
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Linear congruential generator: `state = state * 1664525 + 1013904223 (mod 2^32)`.
///
/// Output is `state / 2^32`, taken after the state update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRng {
    state: u32,
}

impl DailyRng {
    /// Start a stream from a seed. Negative seeds wrap into the unsigned range.
    pub fn new(seed: i32) -> Self {
        Self { state: seed as u32 }
    }

    /// Current internal state, for persisting a stream position
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Resume a stream from a persisted state
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Generate next raw 32-bit value
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Throw away `count` draws
    pub fn skip(&mut self, count: usize) {
        for _ in 0..count {
            self.next_u32();
        }
    }
}

impl RandomSource for DailyRng {
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

/// Adapter that turns any `rand` generator into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct EntropyRng<R: Rng> {
    inner: R,
}

impl<R: Rng> EntropyRng<R> {
    /// Wrap an existing generator
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl EntropyRng<ThreadRng> {
    /// Unseeded generator backed by the thread-local RNG
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl EntropyRng<StdRng> {
    /// Reproducible generator, mainly for tests and bot runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for EntropyRng<R> {
    fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}
