//! Transaction overlay state.

use std::collections::HashMap;

/// Represents a pending write in a transaction overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingWrite {
    /// Set the key to a value.
    Put {
        /// The new value.
        value: String,
    },
    /// Tombstone: the key is unset in this scope, whatever lies beneath.
    Delete,
}

impl PendingWrite {
    /// Returns the value this write leaves visible, `None` for a tombstone.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Put { value } => Some(value),
            Self::Delete => None,
        }
    }

    /// Returns true if this write is a tombstone.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

/// The tentative writes of one transaction block.
#[derive(Debug, Default, Clone)]
pub struct Overlay {
    /// Pending writes: key -> write operation.
    writes: HashMap<String, PendingWrite>,
}

impl Overlay {
    /// Creates an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty overlay with room for `capacity` writes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            writes: HashMap::with_capacity(capacity),
        }
    }

    /// Records a put, replacing any earlier write to the same key.
    pub fn put(&mut self, key: &str, value: &str) {
        let write = PendingWrite::Put {
            value: value.to_owned(),
        };
        match self.writes.get_mut(key) {
            Some(slot) => *slot = write,
            None => {
                self.writes.insert(key.to_owned(), write);
            }
        }
    }

    /// Records a tombstone, replacing any earlier write to the same key.
    pub fn delete(&mut self, key: &str) {
        match self.writes.get_mut(key) {
            Some(slot) => *slot = PendingWrite::Delete,
            None => {
                self.writes.insert(key.to_owned(), PendingWrite::Delete);
            }
        }
    }

    /// Gets the pending write for a key.
    #[must_use]
    pub fn get_pending_write(&self, key: &str) -> Option<&PendingWrite> {
        self.writes.get(key)
    }

    /// Returns all pending writes.
    pub fn pending_writes(&self) -> impl Iterator<Item = (&String, &PendingWrite)> {
        self.writes.iter()
    }

    /// Consumes the overlay, yielding its writes.
    pub fn into_writes(self) -> impl Iterator<Item = (String, PendingWrite)> {
        self.writes.into_iter()
    }

    /// Returns the number of pending writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Returns true if nothing was written in this overlay.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_records_write() {
        let mut overlay = Overlay::new();
        overlay.put("a", "1");

        assert_eq!(overlay.write_count(), 1);
        assert_eq!(
            overlay.get_pending_write("a").and_then(PendingWrite::value),
            Some("1")
        );
    }

    #[test]
    fn delete_records_tombstone() {
        let mut overlay = Overlay::new();
        overlay.delete("a");

        let write = overlay.get_pending_write("a");
        assert!(matches!(write, Some(PendingWrite::Delete)));
        assert_eq!(write.and_then(PendingWrite::value), None);
    }

    #[test]
    fn put_overwrites_previous() {
        let mut overlay = Overlay::new();
        overlay.put("a", "1");
        overlay.put("a", "2");

        assert_eq!(overlay.write_count(), 1);
        if let Some(PendingWrite::Put { value }) = overlay.get_pending_write("a") {
            assert_eq!(value, "2");
        } else {
            panic!("expected Put");
        }
    }

    #[test]
    fn delete_overwrites_put_and_back() {
        let mut overlay = Overlay::new();
        overlay.put("a", "1");
        overlay.delete("a");
        assert!(overlay.get_pending_write("a").is_some_and(PendingWrite::is_delete));

        overlay.put("a", "3");
        assert_eq!(
            overlay.get_pending_write("a").and_then(PendingWrite::value),
            Some("3")
        );
        assert_eq!(overlay.write_count(), 1);
    }

    #[test]
    fn into_writes_drains_everything() {
        let mut overlay = Overlay::with_capacity(2);
        overlay.put("a", "1");
        overlay.delete("b");

        let mut writes: Vec<_> = overlay.into_writes().collect();
        writes.sort_by(|x, y| x.0.cmp(&y.0));
        assert_eq!(
            writes,
            vec![
                ("a".to_string(), PendingWrite::Put { value: "1".into() }),
                ("b".to_string(), PendingWrite::Delete),
            ]
        );
    }
}
