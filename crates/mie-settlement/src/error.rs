//! # Settlement Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Settlement Failure Modes                        │
//! │                                                                     │
//! │  Core(InsufficientStock)  - Stock can't cover a line; retryable     │
//! │                             with a smaller quantity                 │
//! │  Core(ItemNotFound)       - Order references a deleted item         │
//! │  Core(Validation)         - Bad input, rejected before any I/O      │
//! │  Store(ConnectionFailed)  - Record Store unreachable                │
//! │  Store(...)               - Other store failures                    │
//! │                                                                     │
//! │  Every failure leaves the store untouched: the SQL transaction      │
//! │  rolls back on drop.                                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use mie_core::{CoreError, ValidationError};
use mie_db::DbError;

/// Errors surfaced by settlement and reporting.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// A business rule was violated (insufficient stock, unknown item,
    /// invalid input). The caller may retry with corrected input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The Record Store failed. The settlement attempt is aborted and
    /// nothing was written.
    #[error("Record store error: {0}")]
    Store(#[from] DbError),
}

impl From<ValidationError> for SettlementError {
    fn from(err: ValidationError) -> Self {
        SettlementError::Core(CoreError::Validation(err))
    }
}

/// Raw sqlx errors from the settlement transaction go through DbError so
/// constraint failures keep their categorization.
impl From<sqlx::Error> for SettlementError {
    fn from(err: sqlx::Error) -> Self {
        SettlementError::Store(DbError::from(err))
    }
}

impl SettlementError {
    /// True when the failure is the store being unreachable rather than
    /// a rule violation.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, SettlementError::Store(e) if e.is_unavailable())
    }
}

/// Result type for settlement operations.
pub type SettlementResult<T> = Result<T, SettlementError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_wraps_into_core() {
        let err: SettlementError = ValidationError::Required {
            field: "customer name".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            SettlementError::Core(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_store_unavailability_classification() {
        let err: SettlementError = DbError::PoolExhausted.into();
        assert!(err.is_store_unavailable());

        let err: SettlementError = DbError::not_found("Customer", "x").into();
        assert!(!err.is_store_unavailable());
    }
}
