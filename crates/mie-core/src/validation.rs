//! # Validation Module
//!
//! Input validation for orders and record edits.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Caller (till UI, out of scope here)                       │
//! │  ├── Disables the submit button until name + items are present      │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │  └── Runs before any mutation in settle_order                       │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL constraints                                           │
//! │  └── CHECK (stock >= 0)                                             │
//! │                                                                     │
//! │  Defense in depth: multiple layers catch different errors           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::Order;
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name as entered at the till.
///
/// ## Rules
/// - Must not be empty or all-whitespace
/// - Must be at most 100 characters
///
/// ## Note
/// The value is validated but NOT normalized: settlement matches customers
/// on the exact string, including case and surrounding whitespace.
///
/// ## Example
/// ```rust
/// use mie_core::validation::validate_customer_name;
///
/// assert!(validate_customer_name("Budi").is_ok());
/// assert!(validate_customer_name("   ").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an inventory item name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (>= 1)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in rupiah.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional items)
pub fn validate_price_rupiah(rupiah: i64) -> ValidationResult<()> {
    if rupiah < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Order Validation
// =============================================================================

/// Validates a proposed order before settlement.
///
/// ## Rules
/// - Customer name must be present
/// - At least one line item
/// - At most MAX_ORDER_LINES lines
/// - Every line quantity within [1, MAX_LINE_QUANTITY]
///
/// ## User Workflow
/// ```text
/// "Buat Pesanan" pressed
///      │
///      ▼
/// validate_order(order) ← THIS FUNCTION
///      │
///      ├── name empty?    → "customer name is required"
///      ├── no lines?      → "order lines must contain at least one entry"
///      ├── qty <= 0?      → "quantity must be positive"
///      │
///      └── OK → settlement proceeds to the Record Store
/// ```
pub fn validate_order(order: &Order) -> ValidationResult<()> {
    validate_customer_name(&order.customer_name)?;

    if order.lines.is_empty() {
        return Err(ValidationError::Empty {
            field: "order lines".to_string(),
        });
    }

    if order.lines.len() > MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "order lines".to_string(),
            min: 1,
            max: MAX_ORDER_LINES as i64,
        });
    }

    for line in &order.lines {
        validate_quantity(line.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderLine;

    fn order(name: &str, lines: Vec<(i64,)>) -> Order {
        Order {
            customer_name: name.to_string(),
            lines: lines
                .into_iter()
                .enumerate()
                .map(|(i, (qty,))| OrderLine {
                    item_id: format!("item-{i}"),
                    quantity: qty,
                })
                .collect(),
        }
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Budi").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_rupiah() {
        assert!(validate_price_rupiah(0).is_ok());
        assert!(validate_price_rupiah(8_000).is_ok());
        assert!(validate_price_rupiah(-100).is_err());
    }

    #[test]
    fn test_validate_order_happy_path() {
        assert!(validate_order(&order("Budi", vec![(3,), (1,)])).is_ok());
    }

    #[test]
    fn test_validate_order_rejects_empty_name_and_lines() {
        assert!(validate_order(&order("", vec![(3,)])).is_err());
        assert!(validate_order(&order("Budi", vec![])).is_err());
    }

    #[test]
    fn test_validate_order_rejects_bad_quantity() {
        assert!(validate_order(&order("Budi", vec![(3,), (0,)])).is_err());
    }
}
