//! Store statistics.
//!
//! Counters are atomic so reads through `&Store` can be recorded without
//! exclusive access.
//!
//! # Usage
//!
//! ```rust
//! use nestkv_core::Store;
//!
//! let mut store = Store::new();
//! store.set("a", "10");
//! let _ = store.get("a");
//!
//! let stats = store.stats();
//! assert_eq!(stats.sets, 1);
//! assert_eq!(stats.gets, 1);
//! assert_eq!(stats.keys, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for a store.
#[derive(Debug, Default)]
pub struct StoreStats {
    // Operation counters
    /// Total number of get operations.
    gets: AtomicU64,
    /// Total number of set operations.
    sets: AtomicU64,
    /// Total number of unset operations.
    unsets: AtomicU64,
    /// Total number of equality count queries.
    count_queries: AtomicU64,

    // Transaction counters
    /// Total number of transaction blocks opened.
    transactions_begun: AtomicU64,
    /// Total number of successful commits.
    transactions_committed: AtomicU64,
    /// Total number of transaction blocks rolled back.
    transactions_rolled_back: AtomicU64,
    /// Commit/rollback calls made with no open transaction.
    no_transaction: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unset(&self) {
        self.unsets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_count_query(&self) {
        self.count_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.transactions_begun.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records `blocks` transaction blocks discarded by one rollback.
    pub(crate) fn record_rollback(&self, blocks: u64) {
        self.transactions_rolled_back
            .fetch_add(blocks, Ordering::Relaxed);
    }

    pub(crate) fn record_no_transaction(&self) {
        self.no_transaction.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of get operations.
    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    /// Returns the total number of set operations.
    pub fn sets(&self) -> u64 {
        self.sets.load(Ordering::Relaxed)
    }

    /// Returns the total number of unset operations.
    pub fn unsets(&self) -> u64 {
        self.unsets.load(Ordering::Relaxed)
    }

    /// Returns the total number of equality count queries.
    pub fn count_queries(&self) -> u64 {
        self.count_queries.load(Ordering::Relaxed)
    }

    /// Returns the number of transaction blocks opened.
    pub fn transactions_begun(&self) -> u64 {
        self.transactions_begun.load(Ordering::Relaxed)
    }

    /// Returns the number of successful commits.
    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    /// Returns the number of transaction blocks rolled back.
    pub fn transactions_rolled_back(&self) -> u64 {
        self.transactions_rolled_back.load(Ordering::Relaxed)
    }

    /// Returns how often commit/rollback reported no open transaction.
    pub fn no_transaction(&self) -> u64 {
        self.no_transaction.load(Ordering::Relaxed)
    }
}

/// A point-in-time snapshot of store statistics.
///
/// Combines the counters with gauges taken from the store at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Total number of get operations.
    pub gets: u64,
    /// Total number of set operations.
    pub sets: u64,
    /// Total number of unset operations.
    pub unsets: u64,
    /// Total number of equality count queries.
    pub count_queries: u64,
    /// Transaction blocks opened.
    pub transactions_begun: u64,
    /// Successful commits.
    pub transactions_committed: u64,
    /// Transaction blocks rolled back.
    pub transactions_rolled_back: u64,
    /// Commit/rollback calls with no open transaction.
    pub no_transaction: u64,
    /// Open transaction blocks.
    pub depth: usize,
    /// Keys with an effective value.
    pub keys: usize,
    /// Distinct effective values.
    pub distinct_values: usize,
}

impl StatsSnapshot {
    pub(crate) fn from_counters(
        stats: &StoreStats,
        depth: usize,
        keys: usize,
        distinct_values: usize,
    ) -> Self {
        Self {
            gets: stats.gets(),
            sets: stats.sets(),
            unsets: stats.unsets(),
            count_queries: stats.count_queries(),
            transactions_begun: stats.transactions_begun(),
            transactions_committed: stats.transactions_committed(),
            transactions_rolled_back: stats.transactions_rolled_back(),
            no_transaction: stats.no_transaction(),
            depth,
            keys,
            distinct_values,
        }
    }
}
