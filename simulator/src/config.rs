//! Simulator configuration.
//!
//! The policy, climber, indicator and trace sections come from
//! [`cache_core::Settings`]; this file adds the binary-only `[logging]` and
//! `[report]` sections.

use cache_core::{ConfigError, ConfigResult, Settings};
use serde::Deserialize;
use std::path::Path;

/// Configuration printed by `--print-config`.
pub const DEFAULT_CONFIG: &str = r#"# Adaptive Window-TinyLFU simulator configuration

# Number of entries in the simulated cache
maximum_size = 10000

[logging]
# Log level: "error", "warn", "info", "debug", "trace"
# Can be overridden with RUST_LOG environment variable
level = "info"
# Log format: "pretty" (human-readable), "json", or "compact"
format = "pretty"
# Include timestamps
timestamps = true
# Include thread names
thread_names = false
# Include module target
target = true

[report]
# Log a progress line every this many accesses
interval = 100000

[hill_climber]
# Strategy: "minisim"
strategy = "minisim"
# Initial fraction of the cache given to the main region (first element used)
percent_main = [0.99]

[hill_climber.minisim]
# Accesses between decision rounds
period = 100000

[window_tiny_lfu]
# Fraction of the main region reserved for protected entries
percent_main_protected = 0.8

[indicator]
# Number of top keys used for the skew regression
k = 70
# Capacity of the top-K summary
ss_size = 1000
# Capacity the indicator's frequency sketch is sized for
sketch_size = 5000

[trace]
# One of: "counter", "repeating", "uniform", "exponential", "hotspot",
# "zipfian", "scrambled-zipfian", "skewed-zipfian-latest"
distribution = "zipfian"
events = 1000000
seed = 42

[trace.counter]
start = 1

[trace.repeating]
items = 100

[trace.uniform]
lower_bound = 1
upper_bound = 1000

[trace.exponential]
mean = 1.0

[trace.hotspot]
lower_bound = 1
upper_bound = 1000
hotset_fraction = 0.25
hot_opn_fraction = 0.75

[trace.zipfian]
items = 5000
constant = 0.99
"#;

/// Top-level simulator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Policy, climber, indicator and trace settings.
    #[serde(flatten)]
    pub settings: Settings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Progress reporting.
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.settings.validate()?;
        if config.report.interval == 0 {
            return Err(ConfigError::invalid("interval", "must be at least 1"));
        }
        Ok(config)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
    /// Single-line human-readable output.
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level, overridden by `RUST_LOG`.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include timestamps.
    #[serde(default = "LoggingConfig::default_true")]
    pub timestamps: bool,

    /// Include the module target.
    #[serde(default = "LoggingConfig::default_true")]
    pub target: bool,

    /// Include thread names.
    #[serde(default)]
    pub thread_names: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            format: LogFormat::default(),
            timestamps: true,
            target: true,
            thread_names: false,
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }

    fn default_true() -> bool {
        true
    }
}

/// Progress reporting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Accesses between progress lines. The indicator is reset after each.
    #[serde(default = "ReportConfig::default_interval")]
    pub interval: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
        }
    }
}

impl ReportConfig {
    fn default_interval() -> u64 {
        100_000
    }
}
