use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// The single seeded random source shared by one generation pass.
///
/// Draws are reproducible for a given seed and call order; nothing re-seeds mid-pass.
#[derive(Clone, Debug)]
pub struct GenRng {
    inner: Xoshiro256PlusPlus,
}

impl GenRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[lo, hi)`. An empty range yields `lo`.
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.inner.random_range(lo..hi)
    }

    /// Uniform float in `[lo, hi)`. An empty range yields `lo`.
    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        if lo.is_nan() || hi.is_nan() || hi <= lo {
            return lo;
        }
        self.inner.random_range(lo..hi)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.inner.random_range(0..items.len());
        items.get(idx)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
