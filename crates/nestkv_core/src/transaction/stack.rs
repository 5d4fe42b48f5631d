//! Stack of open transaction overlays.

use crate::transaction::overlay::{Overlay, PendingWrite};
use std::collections::HashMap;

/// Ordered stack of overlays, oldest open transaction at the bottom.
#[derive(Debug, Default, Clone)]
pub struct TransactionStack {
    overlays: Vec<Overlay>,
}

impl TransactionStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of open transaction blocks.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.overlays.len()
    }

    /// Returns true if no transaction is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Opens a new transaction block.
    pub fn push(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    /// Closes the newest transaction block, returning its writes.
    pub fn pop(&mut self) -> Option<Overlay> {
        self.overlays.pop()
    }

    /// Returns the newest overlay, the one that receives writes.
    pub fn top_mut(&mut self) -> Option<&mut Overlay> {
        self.overlays.last_mut()
    }

    /// Removes every overlay, yielding them oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Overlay> + '_ {
        self.overlays.drain(..)
    }

    /// Finds the newest pending write for `key`, scanning top-down.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&PendingWrite> {
        self.overlays
            .iter()
            .rev()
            .find_map(|overlay| overlay.get_pending_write(key))
    }

    /// Resolves the effective value of `key` against `base`.
    ///
    /// The first overlay mentioning the key wins, tombstone or not; the
    /// base map is consulted only when no overlay does.
    #[must_use]
    pub fn resolve<'a>(&'a self, key: &str, base: &'a HashMap<String, String>) -> Option<&'a str> {
        match self.find(key) {
            Some(write) => write.value(),
            None => base.get(key).map(String::as_str),
        }
    }

    /// Returns every key mentioned by any open overlay.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.overlays
            .iter()
            .flat_map(|overlay| overlay.pending_writes().map(|(key, _)| key.as_str()))
    }
}
