//! Hill climbers for adaptive Window-TinyLFU.
//!
//! A [`HillClimber`] observes every access to a cache and periodically
//! suggests moving the boundary between the window and the main region. The
//! [`MiniSimClimber`] does this by replaying a hashed sample of the stream
//! through 101 scaled-down copies of the policy, one per window percentage,
//! and steering the real cache toward whichever copy missed least.
//!
//! [`AdaptiveWindowTinyLfu`] couples a climber with a full-size
//! [`WindowTinyLfu`](wtinylfu::WindowTinyLfu) and applies its decisions.
//!
//! # Example
//!
//! ```
//! use climber::{AdaptiveWindowTinyLfu, MiniSimClimber};
//! use wtinylfu::WindowTinyLfu;
//!
//! let policy = WindowTinyLfu::new(1_000, 0.99, 0.8).unwrap();
//! let climber = MiniSimClimber::new(1_000, 0.99, 0.8, 100).unwrap();
//! let mut cache = AdaptiveWindowTinyLfu::new(policy, climber);
//!
//! for key in 0..10_000u64 {
//!     cache.record(key % 500);
//! }
//! assert!(cache.policy().stats().hits > 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod adaptive;
mod climber;
mod minisim;

pub use adaptive::AdaptiveWindowTinyLfu;
pub use climber::{
    ClimberSnapshot, MAX_WINDOW_PERCENT, MiniSimClimber, REPLICAS, sampling_rate_for,
};
pub use minisim::MiniSimulation;

use cache_core::{Adaptation, QueueType};

/// A controller that tunes the window/main split of a cache.
///
/// The cache reports every access through [`on_hit`](HillClimber::on_hit) or
/// [`on_miss`](HillClimber::on_miss) and then calls
/// [`adapt`](HillClimber::adapt) once, applying the returned instruction.
pub trait HillClimber {
    /// The key was found in `queue`.
    fn on_hit(&mut self, key: u64, queue: QueueType, is_full: bool);

    /// The key was not resident.
    fn on_miss(&mut self, key: u64, is_full: bool);

    /// Decide whether to move the boundary, given the current segment sizes.
    fn adapt(
        &mut self,
        window_size: usize,
        probation_size: usize,
        protected_size: usize,
        is_full: bool,
    ) -> Adaptation;
}
