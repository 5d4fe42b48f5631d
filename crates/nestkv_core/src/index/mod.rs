//! Reverse index from values to occurrence counts.
//!
//! The index answers "how many keys currently hold value V" in O(1). It has
//! no notion of transactions: the store adjusts it on every effective
//! change, so it always describes the state a `get` would observe.
//!
//! # Index Types
//!
//! - [`ValueIndex`]: O(1) increment, decrement, and equality count

mod value;

pub use value::ValueIndex;
