//! Generator-backed random source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::RandomSource;

/// Uniform index selection backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    /// Creates a source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible source.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandomSource {
    fn next_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_stay_below_upper_bound() {
        let mut source = StdRandomSource::from_entropy();
        for upper in 1..20 {
            for _ in 0..50 {
                assert!(source.next_index(upper) < upper);
            }
        }
    }

    #[test]
    fn zero_upper_bound_returns_zero() {
        assert_eq!(StdRandomSource::seeded(7).next_index(0), 0);
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let mut a = StdRandomSource::seeded(42);
        let mut b = StdRandomSource::seeded(42);
        let left: Vec<usize> = (0..16).map(|_| a.next_index(100)).collect();
        let right: Vec<usize> = (0..16).map(|_| b.next_index(100)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn every_index_is_eventually_drawn() {
        let mut source = StdRandomSource::seeded(1);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[source.next_index(4)] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
