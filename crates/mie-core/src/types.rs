//! # Domain Types
//!
//! Core domain types used throughout Mie Kasir.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────┐        │
//! │  │ InventoryItem  │  │    Customer    │  │  Transaction   │        │
//! │  │ ─────────────  │  │ ─────────────  │  │ ─────────────  │        │
//! │  │ id (UUID)      │  │ id (UUID)      │  │ id (UUID)      │        │
//! │  │ name           │  │ name (natural) │  │ customer_name  │        │
//! │  │ stock (kg)     │  │ total_purchase │  │ total_rupiah   │        │
//! │  │ price_rupiah?  │  │ visits         │  │ date / time    │        │
//! │  └────────────────┘  └────────────────┘  └───────┬────────┘        │
//! │                                                  │ 1:N              │
//! │  ┌────────────────┐  ┌────────────────┐  ┌───────▼────────┐        │
//! │  │ Order (ephem.) │  │ StoreSettings  │  │TransactionItem │        │
//! │  │ ─────────────  │  │ ─────────────  │  │ ─────────────  │        │
//! │  │ customer_name  │  │ business_name  │  │ name_snapshot  │        │
//! │  │ lines[]        │  │ default price  │  │ unit_price     │        │
//! │  └────────────────┘  │ cashback_rate  │  │ line_total     │        │
//! │                      └────────────────┘  └────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Conventions
//! - Every persisted entity has a UUID v4 `id` string
//! - Monetary fields are raw `*_rupiah: i64` columns with `Money` accessors
//! - Transactions are append-only; `Order` never outlives settlement

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{CashbackRate, Money};

// =============================================================================
// Inventory Item
// =============================================================================

/// A product available for sale, stocked by the kilogram.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the cashier and on receipts (e.g. "Ayam").
    pub name: String,

    /// Current stock level in units of `unit`. Never negative.
    pub stock: i64,

    /// Price per unit in whole rupiah.
    /// `None` means "use the configured default per-kg price".
    pub price_rupiah: Option<i64>,

    /// Unit of measure. The business sells noodles by the kilogram.
    pub unit: String,

    /// Free-text details / add-on notes (e.g. "Dibuat dengan telur bebek").
    pub details: Option<String>,

    /// When the item was created.
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Returns the item's own price, if set.
    #[inline]
    pub fn price(&self) -> Option<Money> {
        self.price_rupiah.map(Money::from_rupiah)
    }

    /// Checks whether the current stock covers a requested quantity.
    #[inline]
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.stock - quantity >= 0
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer record with running purchase aggregates.
///
/// ## Natural Key
/// Settlement matches customers by **exact, case-sensitive** name. No
/// trimming or case folding is applied; "budi" and "Budi" are two
/// customers. This mirrors the source system and is a known fragility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    /// Running sum of all settled transaction totals.
    pub total_purchase_rupiah: i64,
    /// Count of settled transactions.
    pub visits: i64,
    /// Date of the most recent settled transaction.
    pub last_transaction: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Returns the running purchase total as Money.
    #[inline]
    pub fn total_purchase(&self) -> Money {
        Money::from_rupiah(self.total_purchase_rupiah)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A settled, durable transaction. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: String,
    /// Customer name as entered at the till (not a foreign key).
    pub customer_name: String,
    /// Total units (kg) across all line items.
    pub quantity: i64,
    /// Effective per-unit price: `total / quantity`, truncated.
    /// Derived and display-only; the invariant binds `total_rupiah`.
    pub price_rupiah: i64,
    /// Exact sum of line totals.
    pub total_rupiah: i64,
    /// Settlement date.
    pub date: NaiveDate,
    /// Settlement time of day, "HH:MM".
    pub time: String,
    /// Human-readable line summary, e.g. "Ayam (3kg), Bakso (1kg)".
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns the transaction total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_rupiah(self.total_rupiah)
    }

    /// Returns the effective per-unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_rupiah(self.price_rupiah)
    }
}

// =============================================================================
// Transaction Item
// =============================================================================

/// A line item snapshot embedded in a transaction.
/// Uses the snapshot pattern to freeze item data at settlement time:
/// later price or name edits never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionItem {
    pub id: String,
    pub transaction_id: String,
    /// The inventory item this line referenced at settlement time.
    pub item_id: String,
    /// Item name at settlement time (frozen).
    pub name_snapshot: String,
    /// Effective unit price at settlement time (frozen).
    pub unit_price_rupiah: i64,
    /// Quantity sold (kg).
    pub quantity: i64,
    /// `unit_price × quantity`.
    pub line_total_rupiah: i64,
}

impl TransactionItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_rupiah(self.unit_price_rupiah)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_rupiah(self.line_total_rupiah)
    }
}

/// A transaction together with its line item snapshots.
/// This is what `settle_order` returns to the caller (receipt data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub transaction: Transaction,
    pub items: Vec<TransactionItem>,
}

// =============================================================================
// Order (ephemeral)
// =============================================================================

/// A proposed order, as assembled at the till.
///
/// Exists only during settlement and is never persisted as its own record;
/// the durable artifacts are the Transaction and its item snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Customer name as typed by the cashier.
    pub customer_name: String,
    /// Ordered sequence of line items. Must be non-empty.
    pub lines: Vec<OrderLine>,
}

/// One line of a proposed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Must reference an existing InventoryItem.
    pub item_id: String,
    /// Quantity in the item's unit. Must be >= 1.
    pub quantity: i64,
}

// =============================================================================
// Store Settings
// =============================================================================

/// Store-wide configuration used by settlement and reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Business name (receipt header).
    pub business_name: String,
    /// Fallback per-kg price for items without their own price.
    pub default_price_rupiah: i64,
    /// Annual customer cashback rate.
    pub cashback_rate: CashbackRate,
}

impl StoreSettings {
    /// Returns the default per-kg price as Money.
    #[inline]
    pub fn default_price(&self) -> Money {
        Money::from_rupiah(self.default_price_rupiah)
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            business_name: "Mie Wiwiek".to_string(),
            default_price_rupiah: 8_000,
            cashback_rate: CashbackRate::default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
