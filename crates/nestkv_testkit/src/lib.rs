//! # nestkv Testkit
//!
//! Test utilities for nestkv.
//!
//! This crate provides:
//! - Property-based operation generators using proptest
//! - A brute-force reference model to check the store against
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nestkv_testkit::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn store_matches_model(ops in op_sequence_strategy(64)) {
//!         let mut store = Store::new();
//!         let mut model = ReferenceModel::new(RollbackScope::Innermost);
//!         for op in &ops {
//!             prop_assert_eq!(apply(&mut store, op), model.apply(op));
//!             check_against_model(&store, &model)?;
//!         }
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use nestkv_core::{Config, CoreError, RollbackScope, Store};
    pub use proptest::prelude::*;
}

pub use generators::*;
pub use model::*;
