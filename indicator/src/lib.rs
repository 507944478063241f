//! Skew estimation for access streams.
//!
//! [`Indicator`] watches the same stream as a cache and reports how strongly
//! accesses concentrate on a few keys. It is diagnostic only and never
//! touches the cache it observes.
//!
//! ```
//! use indicator::Indicator;
//!
//! let mut indicator = Indicator::new(70, 1000, 5000).unwrap();
//! for key in [1, 1, 1, 1, 2, 2, 3] {
//!     indicator.record(key);
//! }
//! assert_eq!(indicator.sample(), 7);
//! assert!(indicator.skew().is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod indicator;
mod regression;
mod stream_summary;

pub use indicator::{HISTOGRAM_BUCKETS, Indicator, IndicatorSnapshot};
pub use regression::SimpleRegression;
pub use stream_summary::{Counter, StreamSummary};
