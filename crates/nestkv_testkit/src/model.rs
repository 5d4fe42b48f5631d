//! Brute-force reference model.
//!
//! The model keeps a full snapshot of the visible state for every open
//! transaction level and answers equality counts by scanning. It is slow
//! and obviously correct, which is the point.

use crate::generators::{Op, VALUES};
use nestkv_core::{CoreError, CoreResult, RollbackScope, Store};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::BTreeMap;

/// Snapshot-per-level model of the store.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    /// `levels[0]` is the committed state; each open transaction adds a copy.
    levels: Vec<BTreeMap<String, String>>,
    rollback_scope: RollbackScope,
}

impl ReferenceModel {
    /// Creates an empty model.
    pub fn new(rollback_scope: RollbackScope) -> Self {
        Self {
            levels: vec![BTreeMap::new()],
            rollback_scope,
        }
    }

    fn top(&self) -> &BTreeMap<String, String> {
        self.levels.last().expect("model always has a base level")
    }

    fn top_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.levels.last_mut().expect("model always has a base level")
    }

    /// Returns the number of open transactions.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Returns the visible value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.top().get(key).map(String::as_str)
    }

    /// Counts visible keys holding `value` by scanning.
    pub fn count_equal_to(&self, value: &str) -> usize {
        self.top().values().filter(|v| v.as_str() == value).count()
    }

    /// Returns the visible entries, sorted by key.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        self.top()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// Applies an operation, mirroring the store's results.
    pub fn apply(&mut self, op: &Op) -> CoreResult<()> {
        match op {
            Op::Set { key, value } => {
                self.top_mut().insert(key.clone(), value.clone());
            }
            Op::Unset { key } => {
                self.top_mut().remove(key);
            }
            Op::Begin => {
                let snapshot = self.top().clone();
                self.levels.push(snapshot);
            }
            Op::Commit => {
                if self.depth() == 0 {
                    return Err(CoreError::NoTransaction);
                }
                let state = self.top().clone();
                self.levels = vec![state];
            }
            Op::Rollback => {
                if self.depth() == 0 {
                    return Err(CoreError::NoTransaction);
                }
                match self.rollback_scope {
                    RollbackScope::Innermost => {
                        self.levels.pop();
                    }
                    RollbackScope::All => self.levels.truncate(1),
                }
            }
        }
        Ok(())
    }
}

/// Checks every observable aspect of `store` against `model`.
///
/// Compares depth, the full effective view, and the equality count of
/// every value in the generator alphabet.
pub fn check_against_model(store: &Store, model: &ReferenceModel) -> Result<(), TestCaseError> {
    prop_assert_eq!(store.depth(), model.depth());
    prop_assert_eq!(store.effective_entries(), model.entries());
    prop_assert_eq!(store.len(), model.entries().len());

    for value in VALUES {
        prop_assert_eq!(
            store.count_equal_to(value),
            model.count_equal_to(value),
            "count for {:?}",
            value
        );
    }
    for (key, value) in model.entries() {
        prop_assert_eq!(store.get(key), Some(value));
    }
    Ok(())
}
