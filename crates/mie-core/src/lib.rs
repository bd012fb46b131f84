//! # mie-core: Pure Business Logic for Mie Kasir
//!
//! This crate is the **heart** of Mie Kasir. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Mie Kasir Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                   mie-settlement                            │   │
//! │  │      settle_order: order ──► transaction + mutations        │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                ★ mie-core (THIS CRATE) ★                    │   │
//! │  │                                                             │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────┐     │   │
//! │  │  │  types   │ │  money   │ │ pricing  │ │   report   │     │   │
//! │  │  │ Customer │ │  Money   │ │ effective│ │  cashback  │     │   │
//! │  │  │ Txn/Item │ │ Cashback │ │  _price  │ │  summary   │     │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └────────────┘     │   │
//! │  │                                                             │   │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────┬───────────────────────────────┘   │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐   │
//! │  │                  mie-db (Record Store)                      │   │
//! │  │          SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryItem, Customer, Transaction, Order)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Effective price resolution and order totals
//! - [`report`] - Read-only sales/cashback aggregation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole rupiah (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mie_core::Money` instead of
// `use mie_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::{CashbackRate, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single order
///
/// ## Business Reason
/// Prevents runaway orders and ensures reasonable transaction sizes.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity (kg) of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
