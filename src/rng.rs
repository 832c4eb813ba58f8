//! Random source shared by the walk and the classifier

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Seed value that requests entropy seeding instead of a fixed stream.
pub const SEED_SENTINEL: i64 = -1;

/// Uniform draws consumed by the generator.
///
/// All draws of one generation come from a single stream, so the call order
/// is part of the result.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn uniform01(&mut self) -> f64;

    /// Uniform integer in `[lo, hi)`. Returns `lo` when the range is empty.
    fn int_range(&mut self, lo: usize, hi: usize) -> usize;
}

/// [RandomSource] backed by [StdRng].
pub struct DungeonRng {
    random: StdRng,
}

impl DungeonRng {
    /// Seeded from `seed`, or from entropy if `seed` is [SEED_SENTINEL].
    pub fn new(seed: i64) -> Self {
        Self {
            random: if seed == SEED_SENTINEL {
                StdRng::from_entropy()
            } else {
                StdRng::seed_from_u64(seed as u64)
            },
        }
    }
}

impl RandomSource for DungeonRng {
    fn uniform01(&mut self) -> f64 {
        self.random.gen::<f64>()
    }

    fn int_range(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        self.random.gen_range(lo..hi)
    }
}

/// Replays a fixed list of uniform draws, for tests that need exact turns.
#[cfg(test)]
pub(crate) struct ScriptedRng {
    draws: std::collections::VecDeque<f64>,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.draws.len()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn uniform01(&mut self) -> f64 {
        self.draws.pop_front().expect("scripted draws exhausted")
    }

    /// Scales the next scripted draw into the range.
    fn int_range(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        lo + (self.uniform01() * (hi - lo) as f64) as usize
    }
}
