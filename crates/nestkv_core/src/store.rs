//! Transactional key/value store.

use crate::config::{Config, RollbackScope};
use crate::error::{CoreError, CoreResult};
use crate::index::ValueIndex;
use crate::stats::{StatsSnapshot, StoreStats};
use crate::transaction::{Overlay, PendingWrite, TransactionStack};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// The main store handle.
///
/// `Store` holds the committed base map, the stack of open transaction
/// overlays, and a [`ValueIndex`] that always describes the effective
/// state, i.e. what `get` returns for every key right now.
///
/// # Transactions
///
/// - `begin` opens a nested block; blocks nest without limit by default
/// - `commit` applies every open block to the base map and closes them all
/// - `rollback` discards the newest block (or all of them, see
///   [`RollbackScope`]) and restores the index to the state visible below
///
/// Commit and rollback with no open block return
/// [`CoreError::NoTransaction`] and leave the store untouched.
///
/// # Example
///
/// ```rust
/// use nestkv_core::Store;
///
/// let mut store = Store::new();
/// store.set("a", "10");
/// store.set("b", "10");
///
/// store.begin()?;
/// store.set("a", "20");
/// assert_eq!(store.count_equal_to("10"), 1);
///
/// store.rollback()?;
/// assert_eq!(store.get("a"), Some("10"));
/// assert_eq!(store.count_equal_to("10"), 2);
/// # Ok::<(), nestkv_core::CoreError>(())
/// ```
#[derive(Debug)]
pub struct Store {
    /// Configuration.
    config: Config,
    /// Committed key -> value mapping.
    base: HashMap<String, String>,
    /// Open transaction overlays.
    transactions: TransactionStack,
    /// Value -> number of keys effectively holding it.
    index: ValueIndex,
    /// Operation counters.
    stats: StoreStats,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty store with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            base: HashMap::with_capacity(config.initial_capacity),
            transactions: TransactionStack::new(),
            index: ValueIndex::new(),
            stats: StoreStats::new(),
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the effective value of `key`, or `None` if it is not set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.stats.record_get();
        self.transactions.resolve(key, &self.base)
    }

    /// Sets `key` to `value` in the active scope.
    ///
    /// The active scope is the newest open transaction, or the base map
    /// when no transaction is open.
    pub fn set(&mut self, key: &str, value: &str) {
        self.stats.record_set();

        let before = self.transactions.resolve(key, &self.base);
        self.index.transition(before, Some(value));

        trace!(key = key, value = value, depth = self.transactions.depth(), "set");
        match self.transactions.top_mut() {
            Some(overlay) => overlay.put(key, value),
            None => {
                self.base.insert(key.to_owned(), value.to_owned());
            }
        }
    }

    /// Unsets `key` in the active scope.
    ///
    /// Inside a transaction this writes a tombstone that hides whatever
    /// the key holds beneath until the block is committed or rolled back.
    pub fn unset(&mut self, key: &str) {
        self.stats.record_unset();

        let before = self.transactions.resolve(key, &self.base);
        self.index.transition(before, None);

        trace!(key = key, depth = self.transactions.depth(), "unset");
        match self.transactions.top_mut() {
            Some(overlay) => overlay.delete(key),
            None => {
                self.base.remove(key);
            }
        }
    }

    /// Returns the number of keys whose effective value equals `value`.
    pub fn count_equal_to(&self, value: &str) -> usize {
        self.stats.record_count_query();
        self.index.count_equal_to(value)
    }

    /// Opens a new transaction block.
    ///
    /// # Errors
    ///
    /// Returns `TransactionDepthExceeded` only when `Config::max_depth` is
    /// set and already reached. With the default configuration this never
    /// fails.
    pub fn begin(&mut self) -> CoreResult<()> {
        if let Some(limit) = self.config.max_depth {
            if self.transactions.depth() >= limit {
                return Err(CoreError::depth_exceeded(limit));
            }
        }

        self.transactions
            .push(Overlay::with_capacity(self.config.overlay_capacity));
        self.stats.record_begin();
        debug!(depth = self.transactions.depth(), "transaction begun");
        Ok(())
    }

    /// Commits every open transaction block into the base map.
    ///
    /// Overlays are applied oldest first, so the newest write to a key
    /// wins. The index is already current and is not touched.
    ///
    /// # Errors
    ///
    /// Returns `NoTransaction` if no transaction is open.
    pub fn commit(&mut self) -> CoreResult<()> {
        if self.transactions.is_empty() {
            self.stats.record_no_transaction();
            return Err(CoreError::NoTransaction);
        }

        let depth = self.transactions.depth();
        let mut applied = 0usize;
        for overlay in self.transactions.drain() {
            for (key, write) in overlay.into_writes() {
                applied += 1;
                match write {
                    PendingWrite::Put { value } => {
                        self.base.insert(key, value);
                    }
                    PendingWrite::Delete => {
                        self.base.remove(&key);
                    }
                }
            }
        }

        self.stats.record_commit();
        debug!(depth = depth, applied = applied, "transactions committed");
        Ok(())
    }

    /// Rolls back the newest transaction block.
    ///
    /// With [`RollbackScope::All`] every open block is discarded instead.
    ///
    /// # Errors
    ///
    /// Returns `NoTransaction` if no transaction is open.
    pub fn rollback(&mut self) -> CoreResult<()> {
        if self.transactions.is_empty() {
            self.stats.record_no_transaction();
            return Err(CoreError::NoTransaction);
        }

        let blocks = match self.config.rollback_scope {
            RollbackScope::Innermost => u64::from(self.discard_top()),
            RollbackScope::All => {
                let mut blocks = 0;
                while self.discard_top() {
                    blocks += 1;
                }
                blocks
            }
        };

        self.stats.record_rollback(blocks);
        debug!(
            blocks = blocks,
            depth = self.transactions.depth(),
            "transaction rolled back"
        );
        Ok(())
    }

    /// Pops the newest overlay and moves the index back to the view below.
    ///
    /// Returns false if the stack was already empty.
    fn discard_top(&mut self) -> bool {
        let Some(overlay) = self.transactions.pop() else {
            return false;
        };

        for (key, write) in overlay.pending_writes() {
            let restored = self.transactions.resolve(key, &self.base);
            self.index.transition(write.value(), restored);
        }
        true
    }

    /// Returns the number of open transaction blocks.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.transactions.depth()
    }

    /// Returns true if at least one transaction block is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.transactions.is_empty()
    }

    /// Returns the number of keys with an effective value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.occurrences()
    }

    /// Returns true if no key has an effective value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of distinct effective values.
    #[must_use]
    pub fn distinct_values(&self) -> usize {
        self.index.len()
    }

    /// Returns the value index.
    pub fn index(&self) -> &ValueIndex {
        &self.index
    }

    /// Returns every key with an effective value, sorted by key.
    ///
    /// This walks the base map and every overlay; it is meant for
    /// diagnostics and tests, not for the hot path.
    pub fn effective_entries(&self) -> Vec<(&str, &str)> {
        let mut keys: HashSet<&str> = self.base.keys().map(String::as_str).collect();
        keys.extend(self.transactions.keys());

        let mut entries: Vec<(&str, &str)> = keys
            .into_iter()
            .filter_map(|key| {
                self.transactions
                    .resolve(key, &self.base)
                    .map(|value| (key, value))
            })
            .collect();
        entries.sort_unstable();
        entries
    }

    /// Returns a snapshot of the store statistics.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot::from_counters(
            &self.stats,
            self.depth(),
            self.len(),
            self.distinct_values(),
        )
    }
}
