//! Nested transaction overlays.
//!
//! Each open transaction block owns an [`Overlay`] of pending writes. The
//! overlays form a [`TransactionStack`], oldest at the bottom. A key's
//! effective value is taken from the newest overlay that mentions it, and
//! from the committed base map when no overlay does.
//!
//! Overlays only record their own writes; a nested block sees its parents'
//! writes through the top-down scan rather than through a physical copy.

mod overlay;
mod stack;

pub use overlay::{Overlay, PendingWrite};
pub use stack::TransactionStack;
