//! Core building blocks for adaptive Window-TinyLFU simulation.
//!
//! This crate provides the pieces shared by the policy, the climber and the
//! skew indicator:
//!
//! - **Sketch**: [`FrequencySketch`], a 4-bit count-min sketch with periodic aging
//! - **Hashing**: [`sample_hash`], the process-wide fixed-seed hash used for sampling
//! - **Adaptation**: [`Adaptation`], the bounded resize instruction for a cache
//! - **Queues**: [`QueueType`], the segment an entry resides in
//! - **Configuration**: [`Settings`] and per-strategy parameter structs
//! - **Errors**: [`ConfigError`], raised eagerly at construction
//!
//! # Architecture
//!
//! ```text
//!   access stream
//!        |
//!        +----------------------+----------------------+
//!        v                      v                      v
//!  +-------------+      +----------------+      +-------------+
//!  | real cache  | <--- | MiniSimClimber | ---> | 101 minis   |
//!  | (W-TinyLFU) | adapt| (hill climber) |replay| (W-TinyLFU) |
//!  +-------------+      +----------------+      +-------------+
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod adaptation;
mod config;
mod error;
mod hash;
mod queue;
mod sketch;

pub use adaptation::Adaptation;
pub use config::{
    ClimberStrategy, CounterConfig, DistributionKind, ExponentialConfig, HillClimberConfig,
    HotspotConfig, IndicatorConfig, MiniSimConfig, RepeatingConfig, Settings, TraceConfig,
    UniformConfig, WindowTinyLfuConfig, ZipfianConfig,
};
pub use error::{ConfigError, ConfigResult};
pub use hash::{SAMPLE_HASH_SEED, sample_hash};
pub use queue::QueueType;
pub use sketch::{FrequencySketch, MAX_FREQUENCY};
