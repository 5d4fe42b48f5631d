//! Error types for nestkv core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in nestkv core operations.
///
/// Reads and writes against well-formed keys never fail; only transaction
/// control can report a condition back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Commit or rollback was requested with no open transaction.
    #[error("NO TRANSACTION")]
    NoTransaction,

    /// Opening another transaction block would exceed the configured depth.
    #[error("transaction depth limit of {limit} exceeded")]
    TransactionDepthExceeded {
        /// The configured maximum depth.
        limit: usize,
    },
}

impl CoreError {
    /// Creates a depth-exceeded error.
    pub fn depth_exceeded(limit: usize) -> Self {
        Self::TransactionDepthExceeded { limit }
    }

    /// Returns true if this is the "no transaction in progress" condition.
    #[must_use]
    pub fn is_no_transaction(&self) -> bool {
        matches!(self, Self::NoTransaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_transaction_display() {
        assert_eq!(CoreError::NoTransaction.to_string(), "NO TRANSACTION");
        assert!(CoreError::NoTransaction.is_no_transaction());
    }

    #[test]
    fn depth_exceeded_display() {
        let err = CoreError::depth_exceeded(3);
        assert_eq!(err.to_string(), "transaction depth limit of 3 exceeded");
        assert!(!err.is_no_transaction());
    }
}
