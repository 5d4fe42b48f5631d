//! Thread-safe store handle.
//!
//! The store is a single mutable resource: base map, overlay stack, and
//! index change together. [`SharedStore`] guards all three behind one
//! lock, so exactly one command runs at a time.

use crate::error::CoreResult;
use crate::stats::StatsSnapshot;
use crate::store::Store;
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable handle to a store shared between threads.
///
/// Each convenience method takes the lock for one operation. Use
/// [`SharedStore::with`] to run a whole transaction block (`begin`, writes,
/// `commit`) without other clients interleaving in the middle of it.
///
/// # Example
///
/// ```rust
/// use nestkv_core::SharedStore;
///
/// let shared = SharedStore::default();
/// shared.with(|store| -> nestkv_core::CoreResult<()> {
///     store.begin()?;
///     store.set("a", "1");
///     store.commit()
/// })?;
///
/// assert_eq!(shared.get("a"), Some("1".to_string()));
/// # Ok::<(), nestkv_core::CoreError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Wraps a store for shared access.
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }

    /// Returns an owned copy of the effective value of `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key).map(str::to_owned)
    }

    /// Sets `key` to `value` in the active scope.
    pub fn set(&self, key: &str, value: &str) {
        self.inner.lock().set(key, value);
    }

    /// Unsets `key` in the active scope.
    pub fn unset(&self, key: &str) {
        self.inner.lock().unset(key);
    }

    /// Returns the number of keys whose effective value equals `value`.
    pub fn count_equal_to(&self, value: &str) -> usize {
        self.inner.lock().count_equal_to(value)
    }

    /// Opens a new transaction block.
    pub fn begin(&self) -> CoreResult<()> {
        self.inner.lock().begin()
    }

    /// Commits every open transaction block.
    pub fn commit(&self) -> CoreResult<()> {
        self.inner.lock().commit()
    }

    /// Rolls back according to the store's rollback scope.
    pub fn rollback(&self) -> CoreResult<()> {
        self.inner.lock().rollback()
    }

    /// Returns a snapshot of the store statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::thread;

    #[test]
    fn handles_share_state() {
        let shared = SharedStore::default();
        let other = shared.clone();

        shared.set("a", "1");
        assert_eq!(other.get("a"), Some("1".to_string()));
        assert_eq!(other.count_equal_to("1"), 1);

        other.unset("a");
        assert_eq!(shared.get("a"), None);
    }

    #[test]
    fn transaction_control_passes_through() {
        let shared = SharedStore::default();
        assert_eq!(shared.commit(), Err(CoreError::NoTransaction));

        shared.begin().unwrap();
        shared.set("a", "1");
        shared.rollback().unwrap();
        assert_eq!(shared.get("a"), None);
        assert_eq!(shared.stats().transactions_rolled_back, 1);
    }

    #[test]
    fn concurrent_blocks_do_not_interleave() {
        let shared = SharedStore::default();
        let mut handles = vec![];

        for t in 0..8 {
            let s = shared.clone();
            handles.push(thread::spawn(move || {
                for i in 0..50 {
                    s.with(|store| {
                        store.begin().unwrap();
                        store.set(&format!("k{t}-{i}"), "v");
                        if i % 2 == 0 {
                            store.commit().unwrap();
                        } else {
                            store.rollback().unwrap();
                        }
                    });
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        shared.with(|store| {
            assert_eq!(store.depth(), 0);
            assert_eq!(store.count_equal_to("v"), 8 * 25);
            assert_eq!(store.len(), 8 * 25);
        });
    }
}
