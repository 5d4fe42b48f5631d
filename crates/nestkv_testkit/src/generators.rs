//! Property-based test generators using proptest.
//!
//! Keys and values come from small alphabets so that generated sequences
//! overwrite, shadow, and share values often.

use nestkv_core::{CoreResult, Store};
use proptest::prelude::*;

/// Values the generators draw from.
pub const VALUES: [&str; 4] = ["0", "1", "2", "3"];

/// One store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// `set(key, value)`
    Set {
        /// Key.
        key: String,
        /// Value.
        value: String,
    },
    /// `unset(key)`
    Unset {
        /// Key.
        key: String,
    },
    /// `begin()`
    Begin,
    /// `commit()`
    Commit,
    /// `rollback()`
    Rollback,
}

/// Strategy for generating keys.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]").expect("Invalid regex")
}

/// Strategy for generating values.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(VALUES.to_vec()).prop_map(str::to_owned)
}

/// Strategy for a single write (set or unset).
pub fn write_op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (key_strategy(), value_strategy()).prop_map(|(key, value)| Op::Set { key, value }),
        1 => key_strategy().prop_map(|key| Op::Unset { key }),
    ]
}

/// Strategy for any operation, writes weighted above transaction control.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => write_op_strategy(),
        2 => Just(Op::Begin),
        1 => Just(Op::Commit),
        1 => Just(Op::Rollback),
    ]
}

/// Strategy for a sequence of up to `max_len` operations.
pub fn op_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..max_len)
}

/// Strategy for a sequence of up to `max_len` writes with no transaction control.
pub fn write_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(write_op_strategy(), 0..max_len)
}

/// Applies an operation to a store.
///
/// Writes always succeed; transaction control returns the store's result.
pub fn apply(store: &mut Store, op: &Op) -> CoreResult<()> {
    match op {
        Op::Set { key, value } => {
            store.set(key, value);
            Ok(())
        }
        Op::Unset { key } => {
            store.unset(key);
            Ok(())
        }
        Op::Begin => store.begin(),
        Op::Commit => store.commit(),
        Op::Rollback => store.rollback(),
    }
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn sequences_stay_within_bounds(ops in op_sequence_strategy(16)) {
            prop_assert!(ops.len() < 16);
        }

        #[test]
        fn write_sequences_hold_no_transaction_control(ops in write_sequence_strategy(32)) {
            let only_writes = ops
                .iter()
                .all(|op| matches!(op, Op::Set { .. } | Op::Unset { .. }));
            prop_assert!(only_writes);
        }

        #[test]
        fn values_come_from_alphabet(value in value_strategy()) {
            prop_assert!(VALUES.contains(&value.as_str()));
        }
    }

    #[test]
    fn apply_drives_the_store() {
        let mut store = Store::new();
        apply(&mut store, &Op::Begin).unwrap();
        apply(
            &mut store,
            &Op::Set {
                key: "a".into(),
                value: "1".into(),
            },
        )
        .unwrap();
        apply(&mut store, &Op::Commit).unwrap();

        assert_eq!(store.get("a"), Some("1"));
        assert!(apply(&mut store, &Op::Rollback).is_err());
    }
}
