//! Resize instructions produced by a hill climber.

/// A bounded instruction to move the window/main boundary of a cache.
///
/// Amounts are entry counts. Applying [`Adaptation::Hold`] must leave the
/// boundary unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Adaptation {
    /// Keep the current split.
    #[default]
    Hold,
    /// Grow the window by taking this many slots from the main region.
    IncreaseWindow(u32),
    /// Shrink the window by returning this many slots to the main region.
    DecreaseWindow(u32),
}

impl Adaptation {
    /// Build an adaptation from a signed change of the window size.
    ///
    /// Zero maps to [`Adaptation::Hold`].
    pub fn from_delta(delta: i64) -> Self {
        let amount = delta.unsigned_abs().min(u32::MAX as u64) as u32;
        match delta {
            0 => Adaptation::Hold,
            d if d > 0 => Adaptation::IncreaseWindow(amount),
            _ => Adaptation::DecreaseWindow(amount),
        }
    }

    /// Returns true if this adaptation leaves the cache unchanged.
    #[inline]
    pub fn is_hold(&self) -> bool {
        matches!(self, Adaptation::Hold)
    }

    /// The signed change of the window size.
    pub fn window_delta(&self) -> i64 {
        match *self {
            Adaptation::Hold => 0,
            Adaptation::IncreaseWindow(n) => n as i64,
            Adaptation::DecreaseWindow(n) => -(n as i64),
        }
    }
}

impl std::fmt::Display for Adaptation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Adaptation::Hold => write!(f, "hold"),
            Adaptation::IncreaseWindow(n) => write!(f, "increase window by {n}"),
            Adaptation::DecreaseWindow(n) => write!(f, "decrease window by {n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_delta() {
        assert_eq!(Adaptation::from_delta(0), Adaptation::Hold);
        assert_eq!(Adaptation::from_delta(25), Adaptation::IncreaseWindow(25));
        assert_eq!(Adaptation::from_delta(-7), Adaptation::DecreaseWindow(7));
    }

    #[test]
    fn test_window_delta() {
        assert_eq!(Adaptation::Hold.window_delta(), 0);
        assert_eq!(Adaptation::IncreaseWindow(3).window_delta(), 3);
        assert_eq!(Adaptation::DecreaseWindow(3).window_delta(), -3);
        assert!(Adaptation::default().is_hold());
    }
}
