//! Window-TinyLFU policy with a movable window/main boundary.
//!
//! New entries enter a small LRU window. Entries falling out of the window
//! become candidates for the main region, a segmented LRU of probation and
//! protected queues. When the cache is full, the candidate competes with the
//! probation LRU entry and the TinyLFU admittor keeps whichever is more
//! frequent.
//!
//! ```text
//!   miss --> [ window ] --candidate--> [ probation ] --hit--> [ protected ]
//!                                           ^                       |
//!                                           +-------demote----------+
//! ```

use ahash::AHashMap;
use cache_core::{Adaptation, ConfigError, ConfigResult, QueueType};

use crate::admission::TinyLfu;
use crate::lru::{LruQueue, NodeArena, NodeId};
use crate::stats::PolicyStats;

/// Outcome of recording one access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The key was resident in the given segment.
    Hit(QueueType),
    /// The key was not resident and has been inserted into the window.
    Miss,
}

impl Access {
    /// Returns true for a hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, Access::Hit(_))
    }
}

/// A Window-TinyLFU cache of keys.
///
/// Tracks residency only; there are no values. Segment limits always sum to
/// the maximum size, and between operations no segment holds more entries
/// than its limit.
pub struct WindowTinyLfu {
    maximum_size: u32,
    max_window: u32,
    max_main: u32,
    max_protected: u32,
    percent_main_protected: f64,

    data: AHashMap<u64, NodeId>,
    arena: NodeArena,
    window: LruQueue,
    probation: LruQueue,
    protected: LruQueue,

    admittor: TinyLfu,
    stats: PolicyStats,
}

impl WindowTinyLfu {
    /// Create a policy holding at most `maximum_size` keys, with
    /// `percent_main` of the space given to the main region and
    /// `percent_main_protected` of the main region to the protected queue.
    pub fn new(
        maximum_size: u32,
        percent_main: f64,
        percent_main_protected: f64,
    ) -> ConfigResult<Self> {
        if maximum_size == 0 {
            return Err(ConfigError::invalid("maximum_size", "must be at least 1"));
        }
        let percent_main = ConfigError::check_fraction("percent_main", percent_main)?;
        let percent_main_protected =
            ConfigError::check_fraction("percent_main_protected", percent_main_protected)?;

        let max_main = (maximum_size as f64 * percent_main) as u32;
        let capacity = maximum_size as usize;

        Ok(Self {
            maximum_size,
            max_window: maximum_size - max_main,
            max_main,
            max_protected: (max_main as f64 * percent_main_protected) as u32,
            percent_main_protected,
            data: AHashMap::with_capacity(capacity + 1),
            arena: NodeArena::with_capacity(capacity + 1),
            window: LruQueue::new(),
            probation: LruQueue::new(),
            protected: LruQueue::new(),
            admittor: TinyLfu::new(capacity),
            stats: PolicyStats::default(),
        })
    }

    /// Record an access to `key`.
    pub fn record(&mut self, key: u64) -> Access {
        self.admittor.record(key);

        match self.data.get(&key).copied() {
            Some(id) => {
                let queue = self.arena.get(id).queue;
                match queue {
                    QueueType::Window => self.window.move_to_back(&mut self.arena, id),
                    QueueType::Probation => self.promote(id),
                    QueueType::Protected => self.protected.move_to_back(&mut self.arena, id),
                }
                self.stats.record_hit();
                Access::Hit(queue)
            }
            None => {
                let id = self.arena.alloc(key, QueueType::Window);
                self.window.push_back(&mut self.arena, id);
                self.data.insert(key, id);
                self.stats.record_miss();
                self.evict();
                Access::Miss
            }
        }
    }

    /// Move the window/main boundary.
    ///
    /// The requested amount is capped by the size of the region it is taken
    /// from. Entries that no longer fit their region are moved across the
    /// boundary, never dropped.
    pub fn apply(&mut self, adaptation: Adaptation) {
        match adaptation {
            Adaptation::Hold => return,
            Adaptation::IncreaseWindow(amount) => {
                let amount = amount.min(self.max_main);
                self.max_main -= amount;
                self.max_window += amount;
                self.resize_protected();

                while self.main_len() > self.max_main as usize {
                    let id = match self.probation.pop_front(&mut self.arena) {
                        Some(id) => id,
                        None => match self.protected.pop_front(&mut self.arena) {
                            Some(id) => id,
                            None => break,
                        },
                    };
                    self.arena.get_mut(id).queue = QueueType::Window;
                    self.window.push_back(&mut self.arena, id);
                }
            }
            Adaptation::DecreaseWindow(amount) => {
                let amount = amount.min(self.max_window);
                self.max_window -= amount;
                self.max_main += amount;
                self.resize_protected();

                while self.window.len() > self.max_window as usize {
                    let Some(id) = self.window.pop_front(&mut self.arena) else {
                        break;
                    };
                    self.arena.get_mut(id).queue = QueueType::Probation;
                    self.probation.push_back(&mut self.arena, id);
                }
            }
        }
        self.demote_protected();

        tracing::debug!(
            %adaptation,
            max_window = self.max_window,
            max_main = self.max_main,
            max_protected = self.max_protected,
            "resized window"
        );
    }

    /// Returns the segment `key` resides in, if any.
    pub fn queue_of(&self, key: u64) -> Option<QueueType> {
        self.data.get(&key).map(|id| self.arena.get(*id).queue)
    }

    /// Returns true if `key` is resident.
    pub fn contains(&self, key: u64) -> bool {
        self.data.contains_key(&key)
    }

    /// Number of resident keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no key is resident.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true once the cache holds its maximum number of keys.
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.maximum_size as usize
    }

    /// Maximum number of resident keys.
    pub fn maximum_size(&self) -> u32 {
        self.maximum_size
    }

    /// Current window limit.
    pub fn max_window(&self) -> u32 {
        self.max_window
    }

    /// Current main region limit.
    pub fn max_main(&self) -> u32 {
        self.max_main
    }

    /// Current protected queue limit.
    pub fn max_protected(&self) -> u32 {
        self.max_protected
    }

    /// Fraction of the cache currently given to the main region.
    pub fn percent_main(&self) -> f64 {
        self.max_main as f64 / self.maximum_size as f64
    }

    /// Entries in the window.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Entries in the probation queue.
    pub fn probation_len(&self) -> usize {
        self.probation.len()
    }

    /// Entries in the protected queue.
    pub fn protected_len(&self) -> usize {
        self.protected.len()
    }

    /// Cumulative statistics.
    pub fn stats(&self) -> &PolicyStats {
        &self.stats
    }

    /// The admission filter.
    pub fn admittor(&self) -> &TinyLfu {
        &self.admittor
    }

    #[inline]
    fn main_len(&self) -> usize {
        self.probation.len() + self.protected.len()
    }

    fn promote(&mut self, id: NodeId) {
        self.probation.unlink(&mut self.arena, id);
        self.arena.get_mut(id).queue = QueueType::Protected;
        self.protected.push_back(&mut self.arena, id);
        self.demote_protected();
    }

    fn demote_protected(&mut self) {
        while self.protected.len() > self.max_protected as usize {
            let Some(id) = self.protected.pop_front(&mut self.arena) else {
                break;
            };
            self.arena.get_mut(id).queue = QueueType::Probation;
            self.probation.push_back(&mut self.arena, id);
        }
    }

    fn resize_protected(&mut self) {
        self.max_protected = (self.max_main as f64 * self.percent_main_protected) as u32;
    }

    fn evict(&mut self) {
        if self.window.len() <= self.max_window as usize {
            return;
        }
        let Some(candidate) = self.window.pop_front(&mut self.arena) else {
            return;
        };
        self.arena.get_mut(candidate).queue = QueueType::Probation;
        self.probation.push_back(&mut self.arena, candidate);

        if self.data.len() > self.maximum_size as usize {
            let Some(victim) = self.probation.front() else {
                return;
            };
            let candidate_key = self.arena.get(candidate).key;
            let victim_key = self.arena.get(victim).key;
            let evict = if self.admittor.admit(candidate_key, victim_key) {
                victim
            } else {
                candidate
            };
            self.remove(evict);
            self.stats.record_eviction();
        }
    }

    fn remove(&mut self, id: NodeId) {
        let node = *self.arena.get(id);
        match node.queue {
            QueueType::Window => self.window.unlink(&mut self.arena, id),
            QueueType::Probation => self.probation.unlink(&mut self.arena, id),
            QueueType::Protected => self.protected.unlink(&mut self.arena, id),
        }
        self.data.remove(&node.key);
        self.arena.release(id);
    }
}
