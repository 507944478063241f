//! Window-TinyLFU eviction policy.
//!
//! [`WindowTinyLfu`] tracks key residency across three LRU segments:
//!
//! - **Window**: admits every new key, sized by `1 - percent_main`
//! - **Probation**: main-region entries that have not been hit since admission
//! - **Protected**: main-region entries hit at least once while in probation
//!
//! A [`TinyLfu`] admittor, backed by a 4-bit frequency sketch, decides whether
//! a key leaving the window may displace the probation LRU entry. The
//! window/main boundary can be moved at runtime with [`WindowTinyLfu::apply`],
//! which is how a hill climber tunes the policy.
//!
//! # Example
//!
//! ```
//! use cache_core::{Adaptation, QueueType};
//! use wtinylfu::{Access, WindowTinyLfu};
//!
//! let mut policy = WindowTinyLfu::new(100, 0.99, 0.8).unwrap();
//! assert_eq!(policy.record(7), Access::Miss);
//! assert_eq!(policy.record(7), Access::Hit(QueueType::Window));
//!
//! policy.apply(Adaptation::IncreaseWindow(9));
//! assert_eq!(policy.max_window(), 10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod admission;
mod lru;
mod policy;
mod stats;

pub use admission::TinyLfu;
pub use policy::{Access, WindowTinyLfu};
pub use stats::PolicyStats;
