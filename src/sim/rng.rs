//! Injectable random source
//!
//! Generation never touches a global RNG. Runs are seeded so a seed always
//! reproduces the same level.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Source of random integers for level generation
pub trait RandomSource {
    /// Random integer in `[lo, hi]`, both ends inclusive
    fn rand_int(&mut self, lo: i32, hi: i32) -> i32;
}

impl<R: Rng> RandomSource for R {
    fn rand_int(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(lo <= hi, "empty range {lo}..={hi}");
        self.random_range(lo..=hi)
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
