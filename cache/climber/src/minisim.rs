use cache_core::ConfigResult;
use wtinylfu::{PolicyStats, WindowTinyLfu};

/// A scaled-down Window-TinyLFU replica at one fixed window/main split.
///
/// Every replica owns its policy, sketch included; nothing is shared between
/// replicas.
pub struct MiniSimulation {
    percent_main: f64,
    policy: WindowTinyLfu,
}

impl MiniSimulation {
    /// Create a replica holding `capacity` keys with `percent_main` of them in
    /// the main region.
    pub fn new(capacity: u32, percent_main: f64, percent_main_protected: f64) -> ConfigResult<Self> {
        Ok(Self {
            percent_main,
            policy: WindowTinyLfu::new(capacity, percent_main, percent_main_protected)?,
        })
    }

    /// Replay one sampled access.
    #[inline]
    pub fn record(&mut self, key: u64) {
        self.policy.record(key);
    }

    /// Cumulative misses since construction.
    #[inline]
    pub fn miss_count(&self) -> u64 {
        self.policy.stats().misses
    }

    /// The fixed main fraction of this replica.
    pub fn percent_main(&self) -> f64 {
        self.percent_main
    }

    /// Statistics of the embedded policy.
    pub fn stats(&self) -> &PolicyStats {
        self.policy.stats()
    }

    /// The embedded policy.
    pub fn policy(&self) -> &WindowTinyLfu {
        &self.policy
    }
}
