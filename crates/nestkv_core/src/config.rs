//! Store configuration.

/// How far a single rollback unwinds the transaction stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollbackScope {
    /// Discard only the most recent transaction block.
    #[default]
    Innermost,
    /// Discard every open transaction block at once.
    All,
}

/// Configuration for creating a store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity hint for the committed base map.
    pub initial_capacity: usize,

    /// Capacity hint for each transaction overlay.
    pub overlay_capacity: usize,

    /// Maximum number of nested transaction blocks (None = unlimited).
    pub max_depth: Option<usize>,

    /// Scope of a rollback call. Commit always closes every block.
    pub rollback_scope: RollbackScope,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 20,
            overlay_capacity: 5,
            max_depth: None,
            rollback_scope: RollbackScope::Innermost,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base map capacity hint.
    #[must_use]
    pub const fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the overlay capacity hint.
    #[must_use]
    pub const fn overlay_capacity(mut self, capacity: usize) -> Self {
        self.overlay_capacity = capacity;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the rollback scope.
    #[must_use]
    pub const fn rollback_scope(mut self, scope: RollbackScope) -> Self {
        self.rollback_scope = scope;
        self
    }
}
