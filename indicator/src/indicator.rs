//! Recency versus frequency bias of an access stream.

use cache_core::{ConfigError, ConfigResult, FrequencySketch, IndicatorConfig, MAX_FREQUENCY};

use crate::regression::SimpleRegression;
use crate::stream_summary::StreamSummary;

/// Number of histogram buckets, one per 4-bit counter value.
pub const HISTOGRAM_BUCKETS: usize = MAX_FREQUENCY as usize + 1;

/// Histogram of the sketch estimate seen at each access.
#[derive(Debug, Clone, Default)]
struct Hinter {
    freq: [u64; HISTOGRAM_BUCKETS],
    sum: u64,
    count: u64,
}

impl Hinter {
    fn increment(&mut self, frequency: u8) {
        let bucket = (frequency as usize).min(HISTOGRAM_BUCKETS - 1);
        self.freq[bucket] += 1;
        self.sum += frequency as u64;
        self.count += 1;
    }

    fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum as f64 / self.count as f64)
    }
}

/// Read-only view of an indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    /// Accesses recorded since the last reset.
    pub sample: u64,
    /// Mean sketch estimate at access time.
    pub hint: Option<f64>,
    /// Estimated zipfian exponent of the top keys.
    pub skew: Option<f64>,
    /// Combined scalar in `[0, 15/16]`.
    pub indicator: Option<f64>,
    /// Histogram of sketch estimates at access time.
    pub frequencies: [u64; HISTOGRAM_BUCKETS],
}

/// Observes an access stream and estimates how frequency-biased it is.
///
/// Two signals are combined. The *hint* is the mean frequency the sketch
/// reported for each key just before it was counted, high when keys recur.
/// The *skew* is the negated slope of `ln(count)` against `ln(rank)` over the
/// top `k` keys of a Space-Saving summary. The indicator scales the hint by
/// `1 - skew^3` while `skew < 1` and by zero otherwise.
///
/// [`reset`](Indicator::reset) clears the histogram, the summary and the
/// sample count. The sketch is kept and ages on its own.
#[derive(Debug, Clone)]
pub struct Indicator {
    k: usize,
    ss_size: usize,
    hinter: Hinter,
    summary: StreamSummary,
    sketch: FrequencySketch,
    sample: u64,
}

impl Indicator {
    /// Create an indicator regressing over `k` points of a summary tracking
    /// `ss_size` keys, with a sketch sized for `sketch_size` keys.
    pub fn new(k: usize, ss_size: usize, sketch_size: usize) -> ConfigResult<Self> {
        if k == 0 {
            return Err(ConfigError::invalid("k", "must be at least 1"));
        }
        if ss_size == 0 {
            return Err(ConfigError::invalid("ss_size", "must be at least 1"));
        }
        if sketch_size == 0 {
            return Err(ConfigError::invalid("sketch_size", "must be at least 1"));
        }
        Ok(Self {
            k,
            ss_size,
            hinter: Hinter::default(),
            summary: StreamSummary::new(ss_size),
            sketch: FrequencySketch::with_capacity(sketch_size),
            sample: 0,
        })
    }

    /// Create an indicator from its configuration section.
    pub fn from_config(config: &IndicatorConfig) -> ConfigResult<Self> {
        Self::new(config.k, config.ss_size, config.sketch_size)
    }

    /// Record one access.
    pub fn record(&mut self, key: u64) {
        self.hinter.increment(self.sketch.frequency(key));
        self.sketch.increment(key);
        self.summary.offer(key);
        self.sample += 1;
    }

    /// Start a new observation window.
    pub fn reset(&mut self) {
        tracing::trace!(sample = self.sample, "indicator reset");
        self.hinter = Hinter::default();
        self.summary = StreamSummary::new(self.ss_size);
        self.sample = 0;
    }

    /// Accesses recorded since the last reset.
    pub fn sample(&self) -> u64 {
        self.sample
    }

    /// Histogram of sketch estimates at access time.
    pub fn frequencies(&self) -> &[u64; HISTOGRAM_BUCKETS] {
        &self.hinter.freq
    }

    /// Mean sketch estimate at access time, or `None` before any access.
    pub fn hint(&self) -> Option<f64> {
        self.hinter.average()
    }

    /// Negated log-log slope over the top `k` keys, or `None` with fewer
    /// than two distinct keys.
    pub fn skew(&self) -> Option<f64> {
        let mut regression = SimpleRegression::new();
        for (rank, counter) in self.summary.top_k(self.k).enumerate() {
            regression.add(((rank + 1) as f64).ln(), (counter.count as f64).ln());
        }
        regression.slope().map(|slope| -slope)
    }

    /// `hint * weight / 16` where `weight = 1 - skew^3` if `skew < 1`, else 0.
    ///
    /// `None` whenever the hint or the skew is undefined.
    pub fn indicator(&self) -> Option<f64> {
        let hint = self.hint()?;
        let skew = self.skew()?;
        let weight = if skew < 1.0 { 1.0 - skew.powi(3) } else { 0.0 };
        Some(hint * weight / HISTOGRAM_BUCKETS as f64)
    }

    /// Number of regression points.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The top-K summary.
    pub fn summary(&self) -> &StreamSummary {
        &self.summary
    }

    /// The private frequency sketch.
    pub fn sketch(&self) -> &FrequencySketch {
        &self.sketch
    }

    /// Capture the current values.
    pub fn snapshot(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            sample: self.sample,
            hint: self.hint(),
            skew: self.skew(),
            indicator: self.indicator(),
            frequencies: self.hinter.freq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator() -> Indicator {
        Indicator::new(70, 1000, 5000).unwrap()
    }

    #[test]
    fn test_empty_is_undefined() {
        let indicator = indicator();
        assert_eq!(indicator.sample(), 0);
        assert_eq!(indicator.hint(), None);
        assert_eq!(indicator.skew(), None);
        assert_eq!(indicator.indicator(), None);
    }

    #[test]
    fn test_small_stream() {
        let mut indicator = indicator();
        let mut reads = Vec::new();

        for (i, key) in [1u64, 1, 1, 1, 2, 2, 3].into_iter().enumerate() {
            reads.push(indicator.sketch().frequency(key));
            indicator.record(key);
            if i < 4 {
                assert_eq!(indicator.skew(), None);
            } else {
                assert!(indicator.skew().is_some());
            }
        }

        let mean = reads.iter().map(|r| *r as f64).sum::<f64>() / reads.len() as f64;
        assert_eq!(indicator.sample(), 7);
        assert!((indicator.hint().unwrap() - mean).abs() < 1e-12);
        assert_eq!(indicator.frequencies().iter().sum::<u64>(), 7);
        assert_eq!(reads, vec![0, 1, 2, 3, 0, 1, 0]);
    }

    #[test]
    fn test_skew_of_two_points() {
        let mut indicator = indicator();
        for key in [1, 1, 1, 1, 2] {
            indicator.record(key);
        }
        // counts 4 and 1 at ranks 1 and 2
        assert!((indicator.skew().unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(indicator.indicator(), Some(0.0));
    }

    #[test]
    fn test_flat_stream_has_weight() {
        let mut indicator = indicator();
        for _ in 0..3 {
            for key in 0..50u64 {
                indicator.record(key);
            }
        }
        let skew = indicator.skew().unwrap();
        assert!(skew.abs() < 1e-9);
        let hint = indicator.hint().unwrap();
        let value = indicator.indicator().unwrap();
        assert!((value - hint / 16.0).abs() < 1e-9);
        assert!(value > 0.0);
    }

    #[test]
    fn test_reset_keeps_sketch() {
        let mut indicator = indicator();
        for key in [5, 5, 5, 6] {
            indicator.record(key);
        }
        indicator.reset();

        assert_eq!(indicator.sample(), 0);
        assert_eq!(indicator.hint(), None);
        assert!(indicator.summary().is_empty());
        assert!(indicator.frequencies().iter().all(|f| *f == 0));
        assert!(indicator.sketch().frequency(5) >= 3);

        indicator.record(5);
        assert_eq!(indicator.frequencies()[3], 1);
    }

    #[test]
    fn test_snapshot() {
        let mut indicator = indicator();
        for key in [1, 2, 1] {
            indicator.record(key);
        }
        let snapshot = indicator.snapshot();
        assert_eq!(snapshot.sample, 3);
        assert_eq!(snapshot.hint, indicator.hint());
        assert_eq!(snapshot.skew, indicator.skew());
        assert_eq!(snapshot.frequencies, *indicator.frequencies());
    }

    #[test]
    fn test_invalid_construction() {
        assert!(Indicator::new(0, 10, 10).is_err());
        assert!(Indicator::new(10, 0, 10).is_err());
        assert!(Indicator::new(10, 10, 0).is_err());
        assert!(Indicator::from_config(&IndicatorConfig::default()).is_ok());
    }
}
