//! Error types for configuration and construction.

/// Errors raised while loading or validating configuration.
///
/// These are only ever produced at construction time. Once a policy, climber
/// or trace has been built, its steady-state operations cannot fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The trace distribution name is not one of the known synthetic generators.
    #[error("unknown distribution: {0}")]
    UnknownDistribution(String),

    /// The hill climber strategy name is not supported.
    #[error("unknown hill climber strategy: {0}")]
    UnknownStrategy(String),

    /// A numeric parameter is outside of its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    Io(String),

    /// The configuration file could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Shorthand for an [`ConfigError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Reject a fraction outside of `[0, 1]` (NaN included).
    pub fn check_fraction(name: &'static str, value: f64) -> ConfigResult<f64> {
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(Self::invalid(name, format!("{value} is outside of [0, 1]")))
        }
    }
}

/// Result type for configuration and construction.
pub type ConfigResult<T> = Result<T, ConfigError>;
