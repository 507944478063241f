//! TinyLFU admission filter.

use cache_core::FrequencySketch;

/// Admits a candidate over a victim by comparing sketch estimates.
#[derive(Debug, Clone)]
pub struct TinyLfu {
    sketch: FrequencySketch,
}

impl TinyLfu {
    /// Create an admittor whose sketch is sized for `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            sketch: FrequencySketch::with_capacity(capacity),
        }
    }

    /// Record one access to `key`.
    #[inline]
    pub fn record(&mut self, key: u64) {
        self.sketch.increment(key);
    }

    /// Returns true if `candidate` should replace `victim`.
    ///
    /// Ties favour the candidate.
    #[inline]
    pub fn admit(&self, candidate: u64, victim: u64) -> bool {
        self.sketch.frequency(candidate) >= self.sketch.frequency(victim)
    }

    /// The estimated frequency of `key`.
    #[inline]
    pub fn frequency(&self, key: u64) -> u8 {
        self.sketch.frequency(key)
    }

    /// The underlying sketch.
    pub fn sketch(&self) -> &FrequencySketch {
        &self.sketch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit_more_frequent() {
        let mut admittor = TinyLfu::new(128);
        for _ in 0..5 {
            admittor.record(1);
        }
        admittor.record(2);

        assert!(admittor.admit(1, 2));
        assert!(!admittor.admit(2, 1));
    }

    #[test]
    fn test_admit_on_tie() {
        let admittor = TinyLfu::new(128);
        assert!(admittor.admit(10, 20));
    }
}
