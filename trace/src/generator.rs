//! Per-distribution key generation.

use rand::Rng;
use rand_distr::{Distribution, Exp, Zipf};
use rand_xoshiro::Xoshiro256PlusPlus;

const FNV_OFFSET_BASIS_64: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME_64: u64 = 1_099_511_628_211;

/// How a zipfian rank maps to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ZipfMapping {
    /// Rank 0, the most popular, is key 0.
    Clustered,
    /// Ranks are hashed over the item space.
    Scrambled,
    /// Rank 0 is the highest key.
    Latest,
}

/// Closed set of generators, chosen once when a trace is built.
#[derive(Debug, Clone)]
pub(crate) enum KeyGenerator {
    Counter {
        start: u64,
    },
    Repeating {
        items: u64,
    },
    Uniform {
        lower: u64,
        upper: u64,
    },
    Exponential {
        exp: Exp<f64>,
    },
    Hotspot {
        lower: u64,
        hot: u64,
        cold: u64,
        hot_opn_fraction: f64,
    },
    Zipfian {
        zipf: Zipf<f64>,
        items: u64,
        mapping: ZipfMapping,
    },
}

impl KeyGenerator {
    /// The key at position `index`, drawing from `rng` when random.
    #[inline]
    pub(crate) fn key(&self, index: u64, rng: &mut Xoshiro256PlusPlus) -> u64 {
        match self {
            KeyGenerator::Counter { start } => start.wrapping_add(index),
            KeyGenerator::Repeating { items } => index % items,
            KeyGenerator::Uniform { lower, upper } => rng.random_range(*lower..=*upper),
            KeyGenerator::Exponential { exp } => exp.sample(rng) as u64,
            KeyGenerator::Hotspot {
                lower,
                hot,
                cold,
                hot_opn_fraction,
            } => {
                let use_hot = *cold == 0 || (*hot > 0 && rng.random::<f64>() < *hot_opn_fraction);
                if use_hot {
                    lower + rng.random_range(0..*hot)
                } else {
                    lower + hot + rng.random_range(0..*cold)
                }
            }
            KeyGenerator::Zipfian {
                zipf,
                items,
                mapping,
            } => {
                let rank = (zipf.sample(rng) as u64).saturating_sub(1).min(items - 1);
                match mapping {
                    ZipfMapping::Clustered => rank,
                    ZipfMapping::Scrambled => fnv_hash64(rank) % items,
                    ZipfMapping::Latest => (items - 1) - rank,
                }
            }
        }
    }
}

/// 64-bit FNV-1a over the eight octets of `value`, low octet first, with the
/// sign bit cleared by absolute value.
pub(crate) fn fnv_hash64(mut value: u64) -> u64 {
    let mut hash = FNV_OFFSET_BASIS_64;
    for _ in 0..8 {
        hash ^= value & 0xff;
        hash = hash.wrapping_mul(FNV_PRIME_64);
        value >>= 8;
    }
    (hash as i64).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv_hash64() {
        assert_eq!(fnv_hash64(0), fnv_hash64(0));
        assert_ne!(fnv_hash64(0), fnv_hash64(1));
        for value in 0..1_000u64 {
            assert!(fnv_hash64(value) <= i64::MAX as u64 + 1);
        }
    }
}
