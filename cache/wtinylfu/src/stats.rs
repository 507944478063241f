//! Per-policy counters.

/// Cumulative access statistics for one policy instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyStats {
    /// Total recorded accesses.
    pub operations: u64,
    /// Accesses that found the key resident.
    pub hits: u64,
    /// Accesses that did not.
    pub misses: u64,
    /// Entries removed to make room.
    pub evictions: u64,
}

impl PolicyStats {
    /// Fraction of operations that hit, or 0 before any operation.
    pub fn hit_rate(&self) -> f64 {
        if self.operations == 0 {
            0.0
        } else {
            self.hits as f64 / self.operations as f64
        }
    }

    /// Fraction of operations that missed, or 0 before any operation.
    pub fn miss_rate(&self) -> f64 {
        if self.operations == 0 {
            0.0
        } else {
            self.misses as f64 / self.operations as f64
        }
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.operations += 1;
        self.hits += 1;
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.operations += 1;
        self.misses += 1;
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let mut stats = PolicyStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.miss_rate(), 0.0);

        stats.record_hit();
        stats.record_miss();
        stats.record_miss();
        stats.record_miss();

        assert_eq!(stats.operations, 4);
        assert_eq!(stats.hit_rate(), 0.25);
        assert_eq!(stats.miss_rate(), 0.75);
    }
}
