//! # Pricing Module
//!
//! Effective price resolution and order-derived text.
//!
//! ## Effective Price
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Effective Price Precedence                         │
//! │                                                                     │
//! │  InventoryItem.price set?                                           │
//! │       │                                                             │
//! │       ├── Yes ──► use the item's own price                          │
//! │       │                                                             │
//! │       └── No  ──► use StoreSettings.default_price (per kg)          │
//! │                                                                     │
//! │  The precedence is fixed: item price wins, else the default.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::types::{InventoryItem, TransactionItem};

/// Resolves the per-unit price used for a line item.
///
/// The item's own price wins; items without a price fall back to the
/// configured default per-kg price.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use mie_core::money::Money;
/// use mie_core::pricing::effective_price;
/// use mie_core::types::InventoryItem;
///
/// let mut item = InventoryItem {
///     id: "i1".into(),
///     name: "Ayam".into(),
///     stock: 10,
///     price_rupiah: Some(9_000),
///     unit: "kg".into(),
///     details: None,
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
///
/// let default = Money::from_rupiah(8_000);
/// assert_eq!(effective_price(&item, default).rupiah(), 9_000);
///
/// item.price_rupiah = None;
/// assert_eq!(effective_price(&item, default).rupiah(), 8_000);
/// ```
#[inline]
pub fn effective_price(item: &InventoryItem, default_price: Money) -> Money {
    item.price().unwrap_or(default_price)
}

/// Builds the human-readable notes line for a transaction from its item
/// snapshots: `"Ayam (3kg), Bakso (1kg)"`.
pub fn order_note(items: &[TransactionItem], unit: &str) -> String {
    items
        .iter()
        .map(|i| format!("{} ({}{})", i.name_snapshot, i.quantity, unit))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(price: Option<i64>) -> InventoryItem {
        InventoryItem {
            id: "i1".to_string(),
            name: "Ayam".to_string(),
            stock: 10,
            price_rupiah: price,
            unit: "kg".to_string(),
            details: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn snapshot(name: &str, qty: i64) -> TransactionItem {
        TransactionItem {
            id: format!("ti-{name}"),
            transaction_id: "t1".to_string(),
            item_id: "i1".to_string(),
            name_snapshot: name.to_string(),
            unit_price_rupiah: 8_000,
            quantity: qty,
            line_total_rupiah: 8_000 * qty,
        }
    }

    #[test]
    fn test_item_price_wins() {
        let price = effective_price(&item(Some(9_500)), Money::from_rupiah(8_000));
        assert_eq!(price.rupiah(), 9_500);
    }

    #[test]
    fn test_default_used_when_price_unset() {
        let price = effective_price(&item(None), Money::from_rupiah(8_000));
        assert_eq!(price.rupiah(), 8_000);
    }

    #[test]
    fn test_order_note_format() {
        let items = vec![snapshot("Ayam", 3), snapshot("Bakso", 1)];
        assert_eq!(order_note(&items, "kg"), "Ayam (3kg), Bakso (1kg)");
    }

    #[test]
    fn test_order_note_single_line() {
        let items = vec![snapshot("Ayam", 3)];
        assert_eq!(order_note(&items, "kg"), "Ayam (3kg)");
    }
}
