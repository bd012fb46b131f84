//! # Repository Module
//!
//! Per-entity Record Store implementations for Mie Kasir.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                     │
//! │                                                                     │
//! │  Caller                                                             │
//! │       │                                                             │
//! │       │  db.inventory().get_by_id("...")                            │
//! │       ▼                                                             │
//! │  InventoryRepository                                                │
//! │  ├── list / search                                                  │
//! │  ├── get_by_id                                                      │
//! │  ├── insert / update / delete                                       │
//! │  └── adjust_stock                                                   │
//! │       │                                                             │
//! │       │  SQL query                                                  │
//! │       ▼                                                             │
//! │  SQLite database                                                    │
//! │                                                                     │
//! │  Benefits:                                                          │
//! │  • SQL is isolated in one place per entity                          │
//! │  • Clean separation from business logic                             │
//! │  • The store's CRUD contract is explicit and testable               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`InventoryRepository`](inventory::InventoryRepository) - Inventory CRUD and stock adjustment
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer CRUD and name lookup
//! - [`TransactionRepository`](transaction::TransactionRepository) - Append-only transaction history

pub mod customer;
pub mod inventory;
pub mod transaction;
