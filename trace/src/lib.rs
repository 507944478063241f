//! Access traces for cache simulation.
//!
//! A [`TraceSource`] hands out a fresh iterator of 64-bit keys on every call
//! to [`TraceSource::keys`]. Synthetic traces are deterministic: the same
//! source always yields the same keys, so a trace can be replayed into
//! several caches and compared. Externally parsed traces can be supplied as a
//! `Vec<u64>` or a slice.
//!
//! ```
//! use trace::{SyntheticTrace, TraceSource};
//!
//! let trace = SyntheticTrace::repeating(3, 7).unwrap();
//! let keys: Vec<u64> = trace.keys().collect();
//! assert_eq!(keys, vec![0, 1, 2, 0, 1, 2, 0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod generator;
mod synthetic;

pub use synthetic::{DEFAULT_SEED, SyntheticTrace, TraceIter, ZIPFIAN_CONSTANT};

/// A finite, restartable sequence of access keys.
pub trait TraceSource {
    /// Iterator over the keys.
    type Keys<'a>: Iterator<Item = u64>
    where
        Self: 'a;

    /// Start a new pass over the trace from its first key.
    fn keys(&self) -> Self::Keys<'_>;
}

impl TraceSource for [u64] {
    type Keys<'a> = std::iter::Copied<std::slice::Iter<'a, u64>>;

    fn keys(&self) -> Self::Keys<'_> {
        self.iter().copied()
    }
}

impl TraceSource for Vec<u64> {
    type Keys<'a> = std::iter::Copied<std::slice::Iter<'a, u64>>;

    fn keys(&self) -> Self::Keys<'_> {
        self.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_list_restarts() {
        let keys = vec![3, 1, 4, 1, 5];
        assert_eq!(keys.keys().collect::<Vec<_>>(), vec![3, 1, 4, 1, 5]);
        assert_eq!(keys.keys().count(), 5);
        assert_eq!(keys[..2].keys().collect::<Vec<_>>(), vec![3, 1]);
    }
}
