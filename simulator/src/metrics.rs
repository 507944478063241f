//! Simulator metrics.

use metriken::{Counter, Gauge, metric};

/// Accesses replayed.
#[metric(name = "sim_accesses", description = "Total accesses replayed")]
pub static ACCESSES: Counter = Counter::new();

/// Accesses that hit.
#[metric(name = "sim_hits", description = "Total cache hits")]
pub static HITS: Counter = Counter::new();

/// Accesses that missed.
#[metric(name = "sim_misses", description = "Total cache misses")]
pub static MISSES: Counter = Counter::new();

/// Keys evicted from the cache.
#[metric(name = "sim_evictions", description = "Total evictions")]
pub static EVICTIONS: Counter = Counter::new();

/// Non-hold adaptations applied to the cache.
#[metric(name = "sim_adaptations", description = "Total window resizes")]
pub static ADAPTATIONS: Counter = Counter::new();

/// Current window limit in entries.
#[metric(name = "sim_window_size", description = "Current window limit")]
pub static WINDOW_SIZE: Gauge = Gauge::new();

/// Window percentage most recently applied by the climber.
#[metric(
    name = "sim_window_percent",
    description = "Applied window percentage"
)]
pub static WINDOW_PERCENT: Gauge = Gauge::new();
