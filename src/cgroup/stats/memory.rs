//! Memory accounting values read from cgroup v1 `memory` controller files.
//!
//! - `memory.usage_in_bytes` holds the raw usage, including page cache.
//! - `memory.stat` is a key/value table held in [`MemoryStat`]; only the
//!   hierarchical `total_cache` entry is consulted.
//!
//! [`MemoryCounters`] combines both with the limit and reservation reported by
//! the container runtime and derives the "true usage" figure.

use std::collections::HashMap;

/// Key in `memory.stat` holding the reclaimable page cache of the whole hierarchy.
pub const TOTAL_CACHE_KEY: &str = "total_cache";

/// The `memory.stat` table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryStat {
    values: HashMap<String, i64>,
}

impl MemoryStat {
    pub fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    /// Returns `total_cache`, or `None` if the kernel did not report it.
    pub fn total_cache(&self) -> Option<i64> {
        self.get(TOTAL_CACHE_KEY)
    }
}

impl From<HashMap<String, i64>> for MemoryStat {
    fn from(values: HashMap<String, i64>) -> Self {
        Self { values }
    }
}

/// Every number needed to publish one container's memory metrics.
///
/// `limit_bytes` and `reservation_bytes` come from runtime inspection and are
/// passed through unchanged, including `0` and "unbounded" sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryCounters {
    pub usage_bytes: i64,
    pub cache_bytes: Option<i64>,
    pub limit_bytes: i64,
    pub reservation_bytes: i64,
}

impl MemoryCounters {
    /// Raw usage minus page cache; a missing cache entry counts as zero.
    ///
    /// The result is not clamped. A negative value means the two files were read
    /// on either side of a change (usually container teardown), see
    /// [`MemoryCounters::is_inconsistent`].
    pub fn true_usage(&self) -> i64 {
        self.usage_bytes
            .saturating_sub(self.cache_bytes.unwrap_or_default())
    }

    /// Returns `true` if the page cache exceeds the raw usage.
    pub fn is_inconsistent(&self) -> bool {
        self.true_usage() < 0
    }
}
