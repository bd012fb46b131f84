//! # mie-settlement: Order Settlement for Mie Kasir
//!
//! The write path of the system: one call turns a proposed order into a
//! durable transaction, stock decrements, and customer aggregate updates.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Mie Kasir Architecture                          │
//! │                                                                     │
//! │  Till / caller                                                      │
//! │       │  settle_order(order)                                        │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │              ★ mie-settlement (THIS CRATE) ★                  │ │
//! │  │                                                               │ │
//! │  │  SettlementService                                            │ │
//! │  │  ├── settle_order   validate → one SQL tx → receipt           │ │
//! │  │  ├── annual_report  per-customer totals + cashback            │ │
//! │  │  └── summary        dashboard numbers                         │ │
//! │  └───────────────┬───────────────────────────┬───────────────────┘ │
//! │                  │                           │                     │
//! │                  ▼                           ▼                     │
//! │      mie-core (pure rules)        mie-db (SQLite Record Store)     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - **All-or-nothing**: a failed line rolls back every earlier mutation
//! - **Fresh reads**: stock is re-read inside the transaction, never
//!   trusted from the caller
//! - **Snapshots**: receipts freeze item names and prices at settlement time
//!
//! ## Usage
//! ```rust,ignore
//! use mie_db::{Database, DbConfig};
//! use mie_settlement::SettlementService;
//!
//! let db = Database::new(DbConfig::new("kasir.db")).await?;
//! let service = SettlementService::with_defaults(db);
//! let receipt = service.settle_order(&order).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{SettlementError, SettlementResult};
pub use service::SettlementService;
