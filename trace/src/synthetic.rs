//! Synthetic trace factories.
//!
//! Each factory validates its parameters and returns a [`SyntheticTrace`] of
//! exactly `events` keys. The random generators follow YCSB:
//!
//! - `uniform` draws from `[lower, upper]`, both bounds included
//! - `exponential` yields `floor(-ln(U) * mean)`
//! - `hotspot` splits `[lower, upper]` into a hot prefix of
//!   `floor(interval * hotset_fraction)` keys and a cold remainder
//! - the zipfian variants draw a popularity rank and differ only in how the
//!   rank maps to a key

use cache_core::{ConfigError, ConfigResult, DistributionKind, TraceConfig};
use rand::SeedableRng;
use rand_distr::{Exp, Zipf};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::TraceSource;
use crate::generator::{KeyGenerator, ZipfMapping};

/// Seed used unless [`SyntheticTrace::with_seed`] is called.
pub const DEFAULT_SEED: u64 = 42;

/// Skew exponent of the skewed-latest zipfian trace.
pub const ZIPFIAN_CONSTANT: f64 = 0.99;

/// A deterministic, finite sequence of keys from a synthetic distribution.
#[derive(Debug, Clone)]
pub struct SyntheticTrace {
    kind: DistributionKind,
    generator: KeyGenerator,
    events: u64,
    seed: u64,
}

impl SyntheticTrace {
    fn new(kind: DistributionKind, generator: KeyGenerator, events: u64) -> Self {
        Self {
            kind,
            generator,
            events,
            seed: DEFAULT_SEED,
        }
    }

    /// Build the trace named by `config`.
    pub fn from_config(config: &TraceConfig) -> ConfigResult<Self> {
        let events = config.events()?;
        let trace = match config.kind()? {
            DistributionKind::Counter => Self::counter(config.counter.start, events),
            DistributionKind::Repeating => Self::repeating(config.repeating.items, events)?,
            DistributionKind::Uniform => Self::uniform(
                config.uniform.lower_bound,
                config.uniform.upper_bound,
                events,
            )?,
            DistributionKind::Exponential => Self::exponential(config.exponential.mean, events)?,
            DistributionKind::Hotspot => Self::hotspot(
                config.hotspot.lower_bound,
                config.hotspot.upper_bound,
                config.hotspot.hot_opn_fraction,
                config.hotspot.hotset_fraction,
                events,
            )?,
            DistributionKind::Zipfian => {
                Self::zipfian(config.zipfian.items, config.zipfian.constant, events)?
            }
            DistributionKind::ScrambledZipfian => {
                Self::scrambled_zipfian(config.zipfian.items, config.zipfian.constant, events)?
            }
            DistributionKind::SkewedZipfianLatest => {
                Self::skewed_zipfian_latest(config.zipfian.items, events)?
            }
        };
        Ok(trace.with_seed(config.seed))
    }

    /// Keys `start, start + 1, ...`.
    pub fn counter(start: u64, events: u64) -> Self {
        Self::new(
            DistributionKind::Counter,
            KeyGenerator::Counter { start },
            events,
        )
    }

    /// Keys `0, 1, ..., items - 1`, repeated.
    pub fn repeating(items: u64, events: u64) -> ConfigResult<Self> {
        if items == 0 {
            return Err(ConfigError::invalid("items", "must be at least 1"));
        }
        Ok(Self::new(
            DistributionKind::Repeating,
            KeyGenerator::Repeating { items },
            events,
        ))
    }

    /// Keys drawn uniformly from `[lower, upper]`.
    pub fn uniform(lower: u64, upper: u64, events: u64) -> ConfigResult<Self> {
        check_bounds(lower, upper)?;
        Ok(Self::new(
            DistributionKind::Uniform,
            KeyGenerator::Uniform { lower, upper },
            events,
        ))
    }

    /// Keys drawn from an exponential distribution with the given mean.
    pub fn exponential(mean: f64, events: u64) -> ConfigResult<Self> {
        if !(mean.is_finite() && mean > 0.0) {
            return Err(ConfigError::invalid(
                "mean",
                format!("{mean} must be positive"),
            ));
        }
        let exp = Exp::new(1.0 / mean).map_err(|e| ConfigError::invalid("mean", e.to_string()))?;
        Ok(Self::new(
            DistributionKind::Exponential,
            KeyGenerator::Exponential { exp },
            events,
        ))
    }

    /// Keys from `[lower, upper]` where a hot prefix of the range receives
    /// `hot_opn_fraction` of the accesses.
    pub fn hotspot(
        lower: u64,
        upper: u64,
        hot_opn_fraction: f64,
        hotset_fraction: f64,
        events: u64,
    ) -> ConfigResult<Self> {
        check_bounds(lower, upper)?;
        let hot_opn_fraction = ConfigError::check_fraction("hot_opn_fraction", hot_opn_fraction)?;
        let hotset_fraction = ConfigError::check_fraction("hotset_fraction", hotset_fraction)?;
        if lower == 0 && upper == u64::MAX {
            return Err(ConfigError::invalid(
                "upper_bound",
                "the range must not cover every key",
            ));
        }

        let interval = upper - lower + 1;
        let hot = (interval as f64 * hotset_fraction) as u64;
        let hot = hot.min(interval);
        Ok(Self::new(
            DistributionKind::Hotspot,
            KeyGenerator::Hotspot {
                lower,
                hot,
                cold: interval - hot,
                hot_opn_fraction,
            },
            events,
        ))
    }

    /// Zipfian keys over `items` with popular items at low identifiers.
    pub fn zipfian(items: u64, constant: f64, events: u64) -> ConfigResult<Self> {
        Self::zipf(
            DistributionKind::Zipfian,
            ZipfMapping::Clustered,
            items,
            constant,
            events,
        )
    }

    /// Zipfian keys over `items` with popular items scattered by hashing.
    pub fn scrambled_zipfian(items: u64, constant: f64, events: u64) -> ConfigResult<Self> {
        Self::zipf(
            DistributionKind::ScrambledZipfian,
            ZipfMapping::Scrambled,
            items,
            constant,
            events,
        )
    }

    /// Zipfian keys over `items` with popular items at the highest
    /// identifiers.
    pub fn skewed_zipfian_latest(items: u64, events: u64) -> ConfigResult<Self> {
        Self::zipf(
            DistributionKind::SkewedZipfianLatest,
            ZipfMapping::Latest,
            items,
            ZIPFIAN_CONSTANT,
            events,
        )
    }

    fn zipf(
        kind: DistributionKind,
        mapping: ZipfMapping,
        items: u64,
        constant: f64,
        events: u64,
    ) -> ConfigResult<Self> {
        if items == 0 {
            return Err(ConfigError::invalid("items", "must be at least 1"));
        }
        if !(constant.is_finite() && constant >= 0.0) {
            return Err(ConfigError::invalid(
                "constant",
                format!("{constant} must be a non-negative number"),
            ));
        }
        let zipf = Zipf::new(items as f64, constant)
            .map_err(|e| ConfigError::invalid("constant", e.to_string()))?;
        Ok(Self::new(
            kind,
            KeyGenerator::Zipfian {
                zipf,
                items,
                mapping,
            },
            events,
        ))
    }

    /// Replace the seed of the random generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The distribution of this trace.
    pub fn kind(&self) -> DistributionKind {
        self.kind
    }

    /// Number of keys in one pass.
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Seed of the random generator.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl TraceSource for SyntheticTrace {
    type Keys<'a> = TraceIter<'a>;

    fn keys(&self) -> TraceIter<'_> {
        TraceIter {
            generator: &self.generator,
            rng: Xoshiro256PlusPlus::seed_from_u64(self.seed),
            index: 0,
            events: self.events,
        }
    }
}

/// One pass over a [`SyntheticTrace`].
pub struct TraceIter<'a> {
    generator: &'a KeyGenerator,
    rng: Xoshiro256PlusPlus,
    index: u64,
    events: u64,
}

impl Iterator for TraceIter<'_> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        if self.index >= self.events {
            return None;
        }
        let key = self.generator.key(self.index, &mut self.rng);
        self.index += 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.events - self.index).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TraceIter<'_> {}

fn check_bounds(lower: u64, upper: u64) -> ConfigResult<()> {
    if lower > upper {
        return Err(ConfigError::invalid(
            "lower_bound",
            format!("{lower} exceeds upper bound {upper}"),
        ));
    }
    Ok(())
}
