//! Fixed-seed hashing for access sampling.
//!
//! Sampling decisions must be reproducible across runs and identical for every
//! climber in the process, so the hasher is built once from a constant seed and
//! never mutated afterwards.

use ahash::RandomState;
use std::hash::BuildHasher;
use std::sync::LazyLock;

/// Seed of the sampling hash.
pub const SAMPLE_HASH_SEED: u64 = 0x7f3a_2142;

static SAMPLE_HASHER: LazyLock<RandomState> = LazyLock::new(|| {
    RandomState::with_seeds(
        SAMPLE_HASH_SEED,
        SAMPLE_HASH_SEED.rotate_left(16),
        SAMPLE_HASH_SEED.rotate_left(32),
        SAMPLE_HASH_SEED.rotate_left(48),
    )
});

/// Hash a key to 32 bits with the process-wide sampling seed.
#[inline]
pub fn sample_hash(key: u64) -> u32 {
    let hash = SAMPLE_HASHER.hash_one(key);
    (hash ^ (hash >> 32)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_hash_is_stable() {
        for key in [0u64, 1, 42, u64::MAX] {
            assert_eq!(sample_hash(key), sample_hash(key));
        }
    }

    #[test]
    fn test_sample_hash_spreads() {
        // A 1-in-10 sample over sequential keys should land near 10%.
        let sampled = (0..100_000u64).filter(|k| sample_hash(*k) % 10 == 0).count();
        assert!((8_000..12_000).contains(&sampled), "sampled {sampled}");
    }
}
