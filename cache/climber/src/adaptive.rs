use cache_core::{Adaptation, ConfigResult, Settings};
use wtinylfu::{Access, WindowTinyLfu};

use crate::HillClimber;
use crate::climber::MiniSimClimber;

/// A Window-TinyLFU cache whose window/main boundary is tuned by a climber.
///
/// Every access is recorded in the policy, reported to the climber, and
/// followed by one call to [`HillClimber::adapt`] whose result is applied
/// immediately.
pub struct AdaptiveWindowTinyLfu<C> {
    policy: WindowTinyLfu,
    climber: C,
    adaptations: u64,
    last: Adaptation,
}

impl<C: HillClimber> AdaptiveWindowTinyLfu<C> {
    /// Couple `policy` with `climber`.
    pub fn new(policy: WindowTinyLfu, climber: C) -> Self {
        Self {
            policy,
            climber,
            adaptations: 0,
            last: Adaptation::Hold,
        }
    }

    /// Record an access to `key` and apply the climber's decision.
    pub fn record(&mut self, key: u64) -> Access {
        let is_full = self.policy.is_full();
        let access = self.policy.record(key);

        match access {
            Access::Hit(queue) => self.climber.on_hit(key, queue, is_full),
            Access::Miss => self.climber.on_miss(key, is_full),
        }

        let adaptation = self.climber.adapt(
            self.policy.window_len(),
            self.policy.probation_len(),
            self.policy.protected_len(),
            is_full,
        );
        if !adaptation.is_hold() {
            self.policy.apply(adaptation);
            self.adaptations += 1;
            self.last = adaptation;
        }
        access
    }

    /// The underlying policy.
    pub fn policy(&self) -> &WindowTinyLfu {
        &self.policy
    }

    /// The climber.
    pub fn climber(&self) -> &C {
        &self.climber
    }

    /// Number of non-hold adaptations applied.
    pub fn adaptations(&self) -> u64 {
        self.adaptations
    }

    /// The most recent non-hold adaptation, or `Hold` if none was applied.
    pub fn last_adaptation(&self) -> Adaptation {
        self.last
    }
}

impl AdaptiveWindowTinyLfu<MiniSimClimber> {
    /// Build a full-size policy and its minisim climber from loaded settings.
    pub fn from_settings(settings: &Settings) -> ConfigResult<Self> {
        let policy = WindowTinyLfu::new(
            settings.cache_size()?,
            settings.hill_climber.initial_percent_main()?,
            settings.window_tiny_lfu.percent_main_protected,
        )?;
        let climber = MiniSimClimber::from_settings(settings)?;
        Ok(Self::new(policy, climber))
    }
}
