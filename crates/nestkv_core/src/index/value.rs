//! Value occurrence index.

use std::collections::HashMap;

/// Counts how many keys map to each distinct value.
///
/// Only strictly positive counts are stored; a value whose count drops to
/// zero is removed, so `len()` is the number of distinct live values.
///
/// # Example
///
/// ```rust
/// use nestkv_core::ValueIndex;
///
/// let mut index = ValueIndex::new();
/// index.increment("10");
/// index.increment("10");
/// index.decrement("10");
///
/// assert_eq!(index.count_equal_to("10"), 1);
/// assert_eq!(index.count_equal_to("20"), 0);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValueIndex {
    /// Value to occurrence count.
    counts: HashMap<String, usize>,
    /// Sum of all counts.
    total: usize,
}

impl ValueIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more key holding `value`.
    pub fn increment(&mut self, value: &str) {
        self.total += 1;
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_owned(), 1);
            }
        }
    }

    /// Records one fewer key holding `value`.
    ///
    /// Decrementing an absent value is a no-op.
    pub fn decrement(&mut self, value: &str) {
        if let Some(count) = self.counts.get_mut(value) {
            self.total -= 1;
            if *count <= 1 {
                self.counts.remove(value);
            } else {
                *count -= 1;
            }
        }
    }

    /// Moves one occurrence from `old` to `new`.
    ///
    /// `None` means "no value". Nothing changes when both sides are equal.
    pub fn transition(&mut self, old: Option<&str>, new: Option<&str>) {
        if old == new {
            return;
        }
        if let Some(old) = old {
            self.decrement(old);
        }
        if let Some(new) = new {
            self.increment(new);
        }
    }

    /// Returns the number of keys holding `value`.
    #[must_use]
    pub fn count_equal_to(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns the number of distinct values with a positive count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns the sum of all counts, i.e. the number of keys holding a value.
    #[must_use]
    pub fn occurrences(&self) -> usize {
        self.total
    }

    /// Returns true if no value is currently held by any key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn increment_and_count() {
        let mut index = ValueIndex::new();
        index.increment("a");
        index.increment("a");
        index.increment("b");

        assert_eq!(index.count_equal_to("a"), 2);
        assert_eq!(index.count_equal_to("b"), 1);
        assert_eq!(index.len(), 2);
        assert_eq!(index.occurrences(), 3);
    }

    #[test]
    fn count_missing_is_zero() {
        let index = ValueIndex::new();
        assert_eq!(index.count_equal_to("missing"), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn decrement_to_zero_removes_entry() {
        let mut index = ValueIndex::new();
        index.increment("a");
        index.decrement("a");

        assert_eq!(index.count_equal_to("a"), 0);
        assert!(index.is_empty());
    }

    #[test]
    fn decrement_missing_is_noop() {
        let mut index = ValueIndex::new();
        index.decrement("ghost");
        assert!(index.is_empty());

        // An absent entry must not go negative and shadow a later increment.
        index.increment("ghost");
        assert_eq!(index.count_equal_to("ghost"), 1);
    }

    #[test]
    fn transition_moves_occurrence() {
        let mut index = ValueIndex::new();
        index.increment("10");

        index.transition(Some("10"), Some("20"));
        assert_eq!(index.count_equal_to("10"), 0);
        assert_eq!(index.count_equal_to("20"), 1);

        index.transition(Some("20"), None);
        assert!(index.is_empty());

        index.transition(None, Some("30"));
        assert_eq!(index.count_equal_to("30"), 1);
    }

    #[test]
    fn transition_same_value_is_noop() {
        let mut index = ValueIndex::new();
        index.increment("x");
        index.transition(Some("x"), Some("x"));
        assert_eq!(index.count_equal_to("x"), 1);
    }

    proptest! {
        #[test]
        fn counts_match_held_values(
            writes in prop::collection::vec((0usize..6, prop::option::of(0u8..4)), 0..64)
        ) {
            // Slot i holds an optional value; the index tracks the transitions.
            let mut slots: Vec<Option<String>> = vec![None; 6];
            let mut index = ValueIndex::new();

            for (slot, value) in writes {
                let value = value.map(|v| v.to_string());
                index.transition(slots[slot].as_deref(), value.as_deref());
                slots[slot] = value;

                for v in 0u8..4 {
                    let v = v.to_string();
                    let held = slots.iter().filter(|s| s.as_deref() == Some(v.as_str())).count();
                    prop_assert_eq!(index.count_equal_to(&v), held);
                }
                prop_assert_eq!(index.occurrences(), slots.iter().flatten().count());
            }
        }
    }
}
