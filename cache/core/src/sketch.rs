//! Approximate frequency counting with periodic aging.
//!
//! [`FrequencySketch`] is a 4-bit count-min sketch. The counter matrix is a
//! single array of `u64` words, each holding 16 counters. A key maps to one
//! counter in each of four words (depth four), and its estimate is the minimum
//! of those four counters. Collisions can only inflate an estimate, so before
//! the first aging event an estimate never undercounts recorded increments.
//!
//! The table length is the capacity rounded up to a power of two. Once the
//! number of effective increments reaches the sample size (ten times the
//! capacity by default) every counter is halved. Halving keeps the relative
//! order of estimates while letting stale popularity fade.

/// Largest value a 4-bit counter can hold.
pub const MAX_FREQUENCY: u8 = 15;

// Seeds from FNV-1a, CityHash and Murmur3.
const SEED: [u64; 4] = [
    0xc3a5_c85c_97cb_3127,
    0xb492_b66f_be98_f273,
    0x9ae1_6a3b_2f90_404f,
    0xcbf2_9ce4_8422_2325,
];

/// Clears the bit shifted in from the neighbouring counter when halving.
const RESET_MASK: u64 = 0x7777_7777_7777_7777;

/// Low bit of every counter, used to count odd counters when halving.
const ONE_MASK: u64 = 0x1111_1111_1111_1111;

/// Default multiple of the capacity after which counters are aged.
const SAMPLE_FACTOR: usize = 10;

/// Largest supported table length.
const MAX_TABLE_SIZE: usize = 1 << 30;

/// A 4-bit count-min sketch with periodic halving.
///
/// Owned exclusively by a single policy or indicator and never shared.
#[derive(Debug, Clone)]
pub struct FrequencySketch {
    table: Box<[u64]>,
    table_mask: usize,
    sample_size: usize,
    additions: usize,
    resets: u64,
}

impl FrequencySketch {
    /// Create a sketch sized for `capacity` distinct keys.
    ///
    /// Counters are aged after `10 * capacity` effective increments.
    pub fn with_capacity(capacity: usize) -> Self {
        let maximum = capacity.clamp(1, MAX_TABLE_SIZE);
        Self::with_sample_size(capacity, maximum * SAMPLE_FACTOR)
    }

    /// Create a sketch sized for `capacity` keys that ages after
    /// `sample_size` effective increments.
    pub fn with_sample_size(capacity: usize, sample_size: usize) -> Self {
        let table_size = capacity.clamp(1, MAX_TABLE_SIZE).next_power_of_two();

        Self {
            table: vec![0; table_size].into_boxed_slice(),
            table_mask: table_size - 1,
            sample_size: sample_size.max(1),
            additions: 0,
            resets: 0,
        }
    }

    /// Returns the estimated number of occurrences of `key`, up to 15.
    ///
    /// Has no side effects.
    pub fn frequency(&self, key: u64) -> u8 {
        let hash = spread(key);
        let start = ((hash & 3) << 2) as u32;

        let mut frequency = MAX_FREQUENCY;
        for depth in 0..4 {
            let index = self.index_of(hash, depth);
            let shift = (start + depth as u32) << 2;
            let count = ((self.table[index] >> shift) & 0xF) as u8;
            frequency = frequency.min(count);
        }
        frequency
    }

    /// Record one occurrence of `key`.
    ///
    /// Counters saturate at 15. When the number of increments that changed at
    /// least one counter reaches the sample size, all counters are halved.
    pub fn increment(&mut self, key: u64) {
        let hash = spread(key);
        let start = ((hash & 3) << 2) as u32;

        let mut added = false;
        for depth in 0..4 {
            let index = self.index_of(hash, depth);
            added |= self.increment_at(index, start + depth as u32);
        }

        if added {
            self.additions += 1;
            if self.additions >= self.sample_size {
                self.reset();
            }
        }
    }

    /// Halve every counter (floor division).
    ///
    /// The addition count is halved as well, less a correction for the
    /// truncation of odd counters.
    pub fn reset(&mut self) {
        let mut odd = 0usize;
        for entry in self.table.iter_mut() {
            odd += (*entry & ONE_MASK).count_ones() as usize;
            *entry = (*entry >> 1) & RESET_MASK;
        }
        self.additions = (self.additions >> 1).saturating_sub(odd >> 2);
        self.resets += 1;

        tracing::trace!(
            resets = self.resets,
            additions = self.additions,
            "frequency sketch aged"
        );
    }

    /// Number of effective increments since the last aging event, less the
    /// halving carried over from it.
    #[inline]
    pub fn additions(&self) -> usize {
        self.additions
    }

    /// Number of effective increments that triggers aging.
    #[inline]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Number of aging events so far.
    #[inline]
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Number of 16-counter words in the table.
    #[inline]
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Increment the 4-bit counter at `counter_index` of word `table_index`
    /// unless it is saturated. Returns true if it was incremented.
    #[inline]
    fn increment_at(&mut self, table_index: usize, counter_index: u32) -> bool {
        let offset = counter_index << 2;
        let mask = 0xF_u64 << offset;
        if self.table[table_index] & mask != mask {
            self.table[table_index] += 1_u64 << offset;
            true
        } else {
            false
        }
    }

    /// Returns the table index for the counter at the specified depth.
    #[inline]
    fn index_of(&self, hash: u64, depth: usize) -> usize {
        let mut hash = hash.wrapping_add(SEED[depth]).wrapping_mul(SEED[depth]);
        hash = hash.wrapping_add(hash >> 32);
        hash as usize & self.table_mask
    }
}

/// Murmur3 64-bit finalizer. Sequential keys otherwise share low bits.
#[inline]
fn spread(key: u64) -> u64 {
    let mut h = key;
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}
