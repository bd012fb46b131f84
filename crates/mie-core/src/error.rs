//! # Error Types
//!
//! Domain-specific error types for mie-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  mie-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  mie-db errors (separate crate)                                     │
//! │  └── DbError          - Record Store failures                       │
//! │                                                                     │
//! │  mie-settlement errors (separate crate)                             │
//! │  └── SettlementError  - What the caller of settle_order sees        │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → SettlementError ← DbError      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, name, quantities)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They abort the current
/// settlement attempt but are never fatal; the caller may retry with
/// corrected input.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Insufficient stock to settle an order line.
    ///
    /// ## When This Occurs
    /// - The re-read stock minus the ordered quantity would go negative
    ///
    /// ## User Workflow
    /// ```text
    /// Order line: Ayam × 12
    ///      │
    ///      ▼
    /// Re-read stock: available = 10
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Ayam", available: 10, requested: 12 }
    ///      │
    ///      ▼
    /// UI shows: "Stok Ayam tidak mencukupi"
    /// ```
    #[error("Insufficient stock for {name} ({item_id}): available {available}, requested {requested}")]
    InsufficientStock {
        item_id: String,
        name: String,
        available: i64,
        requested: i64,
    },

    /// A referenced inventory item does not exist.
    #[error("Inventory item not found: {0}")]
    ItemNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any mutation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Collection is empty where at least one element is required.
    #[error("{field} must contain at least one entry")]
    Empty { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message() {
        let err = CoreError::InsufficientStock {
            item_id: "a1".to_string(),
            name: "Ayam".to_string(),
            available: 10,
            requested: 12,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Ayam (a1): available 10, requested 12"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer name".to_string(),
        };
        assert_eq!(err.to_string(), "customer name is required");

        let err = ValidationError::Empty {
            field: "order lines".to_string(),
        };
        assert_eq!(err.to_string(), "order lines must contain at least one entry");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "customer name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
