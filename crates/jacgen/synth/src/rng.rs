//! Seeded draw source shared by every synthesis stage.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{SynthError, SynthResult};

/// Deterministic stream of random draws.
///
/// Every draw is a pure function of the seed and the draws before it, so a
/// stream must be owned by exactly one generation run and consumed in a
/// fixed order.
#[derive(Clone, Debug)]
pub struct SeedStream {
    seed: u64,
    rng: StdRng,
    draws: u64,
}

impl SeedStream {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Uniform float in `[lo, hi]`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> SynthResult<f64> {
        if !(lo <= hi) {
            return Err(SynthError::InvalidUniformRange { lo, hi });
        }
        self.draws += 1;
        Ok(self.rng.gen_range(lo..=hi))
    }

    /// One element of `options`, uniformly.
    pub fn choose<T: Copy>(&mut self, options: &[T]) -> SynthResult<T> {
        self.draws += 1;
        options
            .choose(&mut self.rng)
            .copied()
            .ok_or(SynthError::EmptyChoice)
    }

    /// `k` distinct elements of `population`, in draw order.
    pub fn sample<T: Copy>(&mut self, population: &[T], k: usize) -> SynthResult<Vec<T>> {
        Ok(self
            .sample_indices(population.len(), k)?
            .into_iter()
            .map(|i| population[i])
            .collect())
    }

    /// `k` distinct indices from `0..n`, in draw order.
    ///
    /// Cost depends on `k`, not `n`, for small `k`.
    pub fn sample_indices(&mut self, n: usize, k: usize) -> SynthResult<Vec<usize>> {
        if k > n {
            return Err(SynthError::SampleTooLarge {
                requested: k,
                available: n,
            });
        }
        self.draws += 1;
        Ok(rand::seq::index::sample(&mut self.rng, n, k).into_vec())
    }

    /// Integer in `[lo, hi]`.
    pub fn int_in(&mut self, lo: usize, hi: usize) -> SynthResult<usize> {
        if lo > hi {
            return Err(SynthError::InvalidRange { lo, hi });
        }
        self.draws += 1;
        Ok(self.rng.gen_range(lo..=hi))
    }
}
