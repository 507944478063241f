//! Configuration for the adaptive policy, the indicator and synthetic traces.
//!
//! [`Settings`] is the single accessor. Each strategy reads its own small
//! parameter struct from it; names are resolved once into closed enums
//! ([`ClimberStrategy`], [`DistributionKind`]) so nothing is re-dispatched per
//! access.
//!
//! # Example
//!
//! ```
//! use cache_core::Settings;
//!
//! let settings = Settings::from_toml(
//!     r#"
//!     maximum_size = 1000
//!
//!     [hill_climber]
//!     percent_main = [0.99]
//!
//!     [hill_climber.minisim]
//!     period = 100
//!
//!     [trace]
//!     distribution = "hotspot"
//!     events = 10000
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.hill_climber.minisim.period, 100);
//! ```

use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;

/// Top-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Number of entries in the real cache.
    pub maximum_size: u64,
    /// Hill climber parameters.
    #[serde(default)]
    pub hill_climber: HillClimberConfig,
    /// Window-TinyLFU parameters shared by the real cache and the replicas.
    #[serde(default)]
    pub window_tiny_lfu: WindowTinyLfuConfig,
    /// Skew indicator parameters.
    #[serde(default)]
    pub indicator: IndicatorConfig,
    /// Synthetic trace parameters.
    #[serde(default)]
    pub trace: TraceConfig,
}

impl Settings {
    /// Load and validate settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check every section. Called by [`Settings::load`] and
    /// [`Settings::from_toml`]; call it directly for settings built in code.
    pub fn validate(&self) -> ConfigResult<()> {
        self.cache_size()?;
        self.hill_climber.validate()?;
        self.window_tiny_lfu.validate()?;
        self.indicator.validate()?;
        self.trace.validate()?;
        Ok(())
    }

    /// The real cache size as a 32-bit entry count.
    pub fn cache_size(&self) -> ConfigResult<u32> {
        match u32::try_from(self.maximum_size) {
            Ok(0) => Err(ConfigError::invalid("maximum_size", "must be at least 1")),
            Ok(size) => Ok(size),
            Err(_) => Err(ConfigError::invalid(
                "maximum_size",
                format!("{} exceeds {}", self.maximum_size, u32::MAX),
            )),
        }
    }
}

/// Supported hill climber strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimberStrategy {
    /// 101 miniature simulations, one per window percentage.
    MiniSim,
}

impl std::str::FromStr for ClimberStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minisim" => Ok(ClimberStrategy::MiniSim),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Hill climber configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HillClimberConfig {
    /// Strategy name, currently only `"minisim"`.
    pub strategy: String,
    /// Initial fractions of the cache given to the main region. The first
    /// element is used.
    pub percent_main: Vec<f64>,
    /// Miniature simulation parameters.
    pub minisim: MiniSimConfig,
}

impl Default for HillClimberConfig {
    fn default() -> Self {
        Self {
            strategy: "minisim".to_string(),
            percent_main: vec![0.99],
            minisim: MiniSimConfig::default(),
        }
    }
}

impl HillClimberConfig {
    /// The resolved strategy.
    pub fn strategy(&self) -> ConfigResult<ClimberStrategy> {
        self.strategy.parse()
    }

    /// The initial main fraction.
    pub fn initial_percent_main(&self) -> ConfigResult<f64> {
        let first = self
            .percent_main
            .first()
            .copied()
            .ok_or_else(|| ConfigError::invalid("percent_main", "must not be empty"))?;
        ConfigError::check_fraction("percent_main", first)
    }

    fn validate(&self) -> ConfigResult<()> {
        self.strategy()?;
        for value in &self.percent_main {
            ConfigError::check_fraction("percent_main", *value)?;
        }
        self.initial_percent_main()?;
        self.minisim.validate()
    }
}

/// Miniature simulation climber configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MiniSimConfig {
    /// Number of recorded accesses between decision rounds.
    pub period: u32,
}

impl Default for MiniSimConfig {
    fn default() -> Self {
        Self { period: 100_000 }
    }
}

impl MiniSimConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.period == 0 {
            return Err(ConfigError::invalid("period", "must be at least 1"));
        }
        Ok(())
    }
}

/// Window-TinyLFU configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowTinyLfuConfig {
    /// Fraction of the main region reserved for protected entries.
    pub percent_main_protected: f64,
}

impl Default for WindowTinyLfuConfig {
    fn default() -> Self {
        Self {
            percent_main_protected: 0.8,
        }
    }
}

impl WindowTinyLfuConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigError::check_fraction("percent_main_protected", self.percent_main_protected)?;
        Ok(())
    }
}

/// Skew indicator configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Number of top-K entries used as regression points.
    pub k: usize,
    /// Capacity of the top-K summary.
    pub ss_size: usize,
    /// Capacity the indicator's frequency sketch is sized for.
    pub sketch_size: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            k: 70,
            ss_size: 1000,
            sketch_size: 5000,
        }
    }
}

impl IndicatorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.k == 0 {
            return Err(ConfigError::invalid("k", "must be at least 1"));
        }
        if self.ss_size == 0 {
            return Err(ConfigError::invalid("ss_size", "must be at least 1"));
        }
        if self.sketch_size == 0 {
            return Err(ConfigError::invalid("sketch_size", "must be at least 1"));
        }
        Ok(())
    }
}

/// Synthetic distributions known to the trace generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionKind {
    /// Strictly increasing keys.
    Counter,
    /// A repeating cycle over a fixed number of items.
    Repeating,
    /// Uniform over an inclusive range.
    Uniform,
    /// Exponentially distributed keys.
    Exponential,
    /// A hot sub-range accessed with a given probability.
    Hotspot,
    /// Zipfian with popular items at low identifiers.
    Zipfian,
    /// Zipfian with popular items scattered over the identifier space.
    ScrambledZipfian,
    /// Zipfian with popular items at the most recent identifiers.
    SkewedZipfianLatest,
}

impl DistributionKind {
    /// Every supported distribution.
    pub const ALL: [DistributionKind; 8] = [
        DistributionKind::Counter,
        DistributionKind::Repeating,
        DistributionKind::Uniform,
        DistributionKind::Exponential,
        DistributionKind::Hotspot,
        DistributionKind::Zipfian,
        DistributionKind::ScrambledZipfian,
        DistributionKind::SkewedZipfianLatest,
    ];

    /// The configuration name of the distribution.
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionKind::Counter => "counter",
            DistributionKind::Repeating => "repeating",
            DistributionKind::Uniform => "uniform",
            DistributionKind::Exponential => "exponential",
            DistributionKind::Hotspot => "hotspot",
            DistributionKind::Zipfian => "zipfian",
            DistributionKind::ScrambledZipfian => "scrambled-zipfian",
            DistributionKind::SkewedZipfianLatest => "skewed-zipfian-latest",
        }
    }
}

impl std::str::FromStr for DistributionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| ConfigError::UnknownDistribution(s.to_string()))
    }
}

impl std::fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthetic trace configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Distribution name.
    pub distribution: String,
    /// Number of accesses to generate. Signed so that a negative count in a
    /// file is reported as a configuration error rather than a parse error.
    pub events: i64,
    /// Seed of the random number generator.
    pub seed: u64,
    /// `counter` parameters.
    pub counter: CounterConfig,
    /// `repeating` parameters.
    pub repeating: RepeatingConfig,
    /// `uniform` parameters.
    pub uniform: UniformConfig,
    /// `exponential` parameters.
    pub exponential: ExponentialConfig,
    /// `hotspot` parameters.
    pub hotspot: HotspotConfig,
    /// Parameters shared by the zipfian variants.
    pub zipfian: ZipfianConfig,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            distribution: "zipfian".to_string(),
            events: 1_000_000,
            seed: 42,
            counter: CounterConfig::default(),
            repeating: RepeatingConfig::default(),
            uniform: UniformConfig::default(),
            exponential: ExponentialConfig::default(),
            hotspot: HotspotConfig::default(),
            zipfian: ZipfianConfig::default(),
        }
    }
}

impl TraceConfig {
    /// The resolved distribution.
    pub fn kind(&self) -> ConfigResult<DistributionKind> {
        self.distribution.parse()
    }

    /// The validated event count.
    pub fn events(&self) -> ConfigResult<u64> {
        u64::try_from(self.events)
            .map_err(|_| ConfigError::invalid("events", format!("{} is negative", self.events)))
    }

    fn validate(&self) -> ConfigResult<()> {
        self.kind()?;
        self.events()?;
        Ok(())
    }
}

/// `counter` parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// First key of the sequence.
    pub start: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self { start: 1 }
    }
}

/// `repeating` parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RepeatingConfig {
    /// Number of distinct items in the cycle.
    pub items: u64,
}

impl Default for RepeatingConfig {
    fn default() -> Self {
        Self { items: 100 }
    }
}

/// `uniform` parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UniformConfig {
    /// Inclusive lower bound.
    pub lower_bound: u64,
    /// Inclusive upper bound.
    pub upper_bound: u64,
}

impl Default for UniformConfig {
    fn default() -> Self {
        Self {
            lower_bound: 1,
            upper_bound: 1000,
        }
    }
}

/// `exponential` parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExponentialConfig {
    /// Mean of the distribution.
    pub mean: f64,
}

impl Default for ExponentialConfig {
    fn default() -> Self {
        Self { mean: 1.0 }
    }
}

/// `hotspot` parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HotspotConfig {
    /// Inclusive lower bound.
    pub lower_bound: u64,
    /// Inclusive upper bound.
    pub upper_bound: u64,
    /// Fraction of the key range that is hot.
    pub hotset_fraction: f64,
    /// Fraction of accesses that go to the hot range.
    pub hot_opn_fraction: f64,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            lower_bound: 1,
            upper_bound: 1000,
            hotset_fraction: 0.25,
            hot_opn_fraction: 0.75,
        }
    }
}

/// Parameters shared by the zipfian variants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ZipfianConfig {
    /// Number of distinct items.
    pub items: u64,
    /// Skew exponent.
    pub constant: f64,
}

impl Default for ZipfianConfig {
    fn default() -> Self {
        Self {
            items: 5000,
            constant: 0.99,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "maximum_size = 512\n";

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml(MINIMAL).unwrap();
        assert_eq!(settings.cache_size(), Ok(512));
        assert_eq!(settings.hill_climber.strategy(), Ok(ClimberStrategy::MiniSim));
        assert_eq!(settings.hill_climber.initial_percent_main(), Ok(0.99));
        assert_eq!(settings.window_tiny_lfu.percent_main_protected, 0.8);
        assert_eq!(settings.indicator.k, 70);
        assert_eq!(settings.trace.kind(), Ok(DistributionKind::Zipfian));
    }

    #[test]
    fn test_full_config() {
        let settings = Settings::from_toml(
            r#"
            maximum_size = 2000

            [hill_climber]
            strategy = "MiniSim"
            percent_main = [0.8, 0.5]

            [hill_climber.minisim]
            period = 500

            [indicator]
            k = 10
            ss_size = 100

            [trace]
            distribution = "Scrambled-Zipfian"
            events = 250
            seed = 7

            [trace.zipfian]
            items = 300
            constant = 1.1
            "#,
        )
        .unwrap();

        assert_eq!(settings.hill_climber.initial_percent_main(), Ok(0.8));
        assert_eq!(settings.hill_climber.minisim.period, 500);
        assert_eq!(settings.indicator.ss_size, 100);
        assert_eq!(settings.indicator.sketch_size, 5000);
        assert_eq!(settings.trace.kind(), Ok(DistributionKind::ScrambledZipfian));
        assert_eq!(settings.trace.events(), Ok(250));
        assert_eq!(settings.trace.zipfian.items, 300);
    }

    #[test]
    fn test_unknown_distribution() {
        let result = Settings::from_toml(
            r#"
            maximum_size = 10
            [trace]
            distribution = "pareto"
            "#,
        );
        assert_eq!(
            result.unwrap_err(),
            ConfigError::UnknownDistribution("pareto".to_string())
        );
    }

    #[test]
    fn test_unknown_strategy() {
        let result = Settings::from_toml(
            r#"
            maximum_size = 10
            [hill_climber]
            strategy = "annealing"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::UnknownStrategy(_))));
    }

    #[test]
    fn test_negative_events() {
        let result = Settings::from_toml(
            r#"
            maximum_size = 10
            [trace]
            events = -5
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "events", .. })
        ));
    }

    #[test]
    fn test_fraction_out_of_range() {
        let result = Settings::from_toml(
            r#"
            maximum_size = 10
            [hill_climber]
            percent_main = [1.5]
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "percent_main",
                ..
            })
        ));

        let result = Settings::from_toml(
            r#"
            maximum_size = 10
            [window_tiny_lfu]
            percent_main_protected = -0.1
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_percent_main() {
        let result = Settings::from_toml(
            r#"
            maximum_size = 10
            [hill_climber]
            percent_main = []
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_cache_size() {
        let result = Settings::from_toml("maximum_size = 0\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "maximum_size",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_period() {
        let result = Settings::from_toml(
            r#"
            maximum_size = 10
            [hill_climber.minisim]
            period = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_error() {
        let result = Settings::from_toml("maximum_size = \"big\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Settings::load("/nonexistent/settings.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_distribution_names_round_trip() {
        for kind in DistributionKind::ALL {
            assert_eq!(kind.as_str().parse::<DistributionKind>(), Ok(kind));
        }
    }
}
