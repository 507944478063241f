//! Ordinary least-squares regression with updating accumulators.

/// Simple linear regression of `y` on `x` with an intercept.
///
/// Sums of squares are accumulated around running means, which keeps the
/// slope stable when the inputs are large relative to their spread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRegression {
    n: u64,
    x_bar: f64,
    y_bar: f64,
    sum_xx: f64,
    sum_xy: f64,
}

impl SimpleRegression {
    /// An empty regression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation.
    pub fn add(&mut self, x: f64, y: f64) {
        if self.n == 0 {
            self.x_bar = x;
            self.y_bar = y;
        } else {
            let n = self.n as f64;
            let weight = n / (n + 1.0);
            let dx = x - self.x_bar;
            let dy = y - self.y_bar;
            self.sum_xx += dx * dx * weight;
            self.sum_xy += dx * dy * weight;
            self.x_bar += dx / (n + 1.0);
            self.y_bar += dy / (n + 1.0);
        }
        self.n += 1;
    }

    /// Number of observations.
    pub fn len(&self) -> u64 {
        self.n
    }

    /// Returns true if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The fitted slope, or `None` with fewer than two observations or no
    /// spread in `x`.
    pub fn slope(&self) -> Option<f64> {
        if self.n < 2 || self.sum_xx.abs() < 10.0 * f64::MIN_POSITIVE {
            return None;
        }
        Some(self.sum_xy / self.sum_xx)
    }
}
