//! Miniature-simulation hill climber.
//!
//! The climber keeps 101 [`MiniSimulation`] replicas. Replica `i` gives `i`
//! percent of its space to the window. A fixed-seed hash selects roughly one
//! access in `sampling_rate`, and every selected access is replayed into all
//! replicas. Each replica is `sampling_rate` times smaller than the real cache,
//! so the sampled sub-stream sees roughly the same pressure.
//!
//! Once more than `period` accesses have been recorded, the next call to
//! `adapt` runs a decision round: the replica with the fewest misses since the
//! previous round wins (lowest index on ties), its window percentage is capped
//! at [`MAX_WINDOW_PERCENT`], and the real cache is told to move its boundary
//! by the difference from the percentage applied last time.

use cache_core::{Adaptation, ConfigError, ConfigResult, QueueType, Settings, sample_hash};

use crate::HillClimber;
use crate::minisim::MiniSimulation;

/// Number of replicas, one per window percentage from 0 to 100.
pub const REPLICAS: usize = 101;

/// Largest window percentage the climber will apply.
pub const MAX_WINDOW_PERCENT: u32 = 80;

/// Returns the sampling rate used for a cache of `cache_size` entries.
///
/// Caches above 100,999 entries sample one access in 1000. Smaller caches
/// sample one in `cache_size / 100`, so their replicas hold about 100 entries.
/// The rate is never zero.
pub fn sampling_rate_for(cache_size: u32) -> u32 {
    let rate = if cache_size / 1000 > 100 {
        1000
    } else {
        cache_size / 100
    };
    rate.max(1)
}

/// Read-only view of a climber's state.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimberSnapshot {
    /// Window percentage most recently applied.
    pub window_percent: u32,
    /// Main fraction most recently applied.
    pub percent_main: f64,
    /// Accesses recorded since the last decision round.
    pub sample: u64,
    /// One access in this many is replayed into the replicas.
    pub sampling_rate: u32,
    /// Capacity of each replica.
    pub replica_capacity: u32,
    /// Cumulative misses of each replica, indexed by window percentage.
    pub misses: Vec<u64>,
}

impl ClimberSnapshot {
    /// Window percentage of the replica with the fewest cumulative misses.
    pub fn best_replica(&self) -> Option<usize> {
        self.misses
            .iter()
            .enumerate()
            .min_by_key(|(_, misses)| **misses)
            .map(|(index, _)| index)
    }
}

/// Hill climber driven by 101 miniature simulations.
pub struct MiniSimClimber {
    minis: Vec<MiniSimulation>,
    prev_misses: Vec<u64>,
    sampling_rate: u32,
    replica_capacity: u32,
    cache_size: u32,
    period: u32,

    sample: u64,
    prev_percent: u32,
}

impl MiniSimClimber {
    /// Create a climber for a cache of `cache_size` entries whose initial
    /// main fraction is `percent_main`.
    ///
    /// `percent_main_protected` sizes the protected queue of every replica.
    /// A decision round runs once more than `period` accesses have been
    /// recorded.
    pub fn new(
        cache_size: u32,
        percent_main: f64,
        percent_main_protected: f64,
        period: u32,
    ) -> ConfigResult<Self> {
        if cache_size == 0 {
            return Err(ConfigError::invalid("maximum_size", "must be at least 1"));
        }
        if period == 0 {
            return Err(ConfigError::invalid("period", "must be at least 1"));
        }
        let percent_main = ConfigError::check_fraction("percent_main", percent_main)?;

        let sampling_rate = sampling_rate_for(cache_size);
        let replica_capacity = cache_size / sampling_rate;

        let minis = (0..REPLICAS)
            .map(|i| {
                let percent_main = 1.0 - (i as f64 / 100.0);
                MiniSimulation::new(replica_capacity, percent_main, percent_main_protected)
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        let prev_percent = ((1.0 - percent_main) * 100.0).round() as u32;

        tracing::info!(
            cache_size,
            sampling_rate,
            replica_capacity,
            period,
            window_percent = prev_percent,
            "created minisim climber"
        );

        Ok(Self {
            minis,
            prev_misses: vec![0; REPLICAS],
            sampling_rate,
            replica_capacity,
            cache_size,
            period,
            sample: 0,
            prev_percent,
        })
    }

    /// Create a climber from loaded settings.
    pub fn from_settings(settings: &Settings) -> ConfigResult<Self> {
        let climber = &settings.hill_climber;
        climber.strategy()?;
        Self::new(
            settings.cache_size()?,
            climber.initial_percent_main()?,
            settings.window_tiny_lfu.percent_main_protected,
            climber.minisim.period,
        )
    }

    /// Record one access, hit or miss.
    ///
    /// Advances the period counter and, if the key is sampled, replays it
    /// into every replica.
    pub fn record_access(&mut self, key: u64) {
        self.sample += 1;

        if sample_hash(key) % self.sampling_rate == 0 {
            for mini in self.minis.iter_mut() {
                mini.record(key);
            }
        }
    }

    /// Run a decision round if the period has elapsed.
    ///
    /// Returns [`Adaptation::Hold`] without touching any state while the
    /// period is still running.
    pub fn decide(&mut self) -> Adaptation {
        if self.sample <= self.period as u64 {
            tracing::trace!(sample = self.sample, period = self.period, "period running");
            return Adaptation::Hold;
        }

        let mut winner = 0;
        let mut fewest = u64::MAX;
        for (index, (mini, prev)) in self.minis.iter().zip(self.prev_misses.iter_mut()).enumerate()
        {
            let misses = mini.miss_count();
            let delta = misses - *prev;
            *prev = misses;
            if delta < fewest {
                fewest = delta;
                winner = index;
            }
        }

        self.sample = 0;
        let old_percent = self.prev_percent;
        let new_percent = (winner as u32).min(MAX_WINDOW_PERCENT);
        self.prev_percent = new_percent;

        let amount = |diff: u32| (diff as u64 * self.cache_size as u64 / 100) as u32;
        let adaptation = if new_percent > old_percent {
            Adaptation::IncreaseWindow(amount(new_percent - old_percent))
        } else if new_percent < old_percent {
            Adaptation::DecreaseWindow(amount(old_percent - new_percent))
        } else {
            Adaptation::Hold
        };

        tracing::debug!(
            winner,
            period_misses = fewest,
            old_percent,
            new_percent,
            %adaptation,
            "decision round"
        );
        adaptation
    }

    /// Window percentage most recently applied.
    pub fn window_percent(&self) -> u32 {
        self.prev_percent
    }

    /// Main fraction most recently applied.
    pub fn percent_main(&self) -> f64 {
        1.0 - self.prev_percent as f64 / 100.0
    }

    /// One access in this many is replayed into the replicas.
    pub fn sampling_rate(&self) -> u32 {
        self.sampling_rate
    }

    /// Capacity of each replica.
    pub fn replica_capacity(&self) -> u32 {
        self.replica_capacity
    }

    /// Size of the real cache.
    pub fn cache_size(&self) -> u32 {
        self.cache_size
    }

    /// Accesses between decision rounds.
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Accesses recorded since the last decision round.
    pub fn sample(&self) -> u64 {
        self.sample
    }

    /// The replicas, indexed by window percentage.
    pub fn replicas(&self) -> &[MiniSimulation] {
        &self.minis
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> ClimberSnapshot {
        ClimberSnapshot {
            window_percent: self.prev_percent,
            percent_main: self.percent_main(),
            sample: self.sample,
            sampling_rate: self.sampling_rate,
            replica_capacity: self.replica_capacity,
            misses: self.minis.iter().map(MiniSimulation::miss_count).collect(),
        }
    }
}

impl HillClimber for MiniSimClimber {
    fn on_hit(&mut self, key: u64, _queue: QueueType, _is_full: bool) {
        self.record_access(key);
    }

    fn on_miss(&mut self, key: u64, _is_full: bool) {
        self.record_access(key);
    }

    fn adapt(
        &mut self,
        _window_size: usize,
        _probation_size: usize,
        _protected_size: usize,
        _is_full: bool,
    ) -> Adaptation {
        self.decide()
    }
}
