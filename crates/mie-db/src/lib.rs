//! # mie-db: Record Store for Mie Kasir
//!
//! This crate is the system of record: per-entity CRUD over SQLite with
//! sqlx for async operations. It knows nothing about settlement rules;
//! multi-record invariants live in `mie-settlement`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Mie Kasir Data Flow                            │
//! │                                                                     │
//! │  SettlementService / reports / seed                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                    mie-db (THIS CRATE)                        │ │
//! │  │                                                               │ │
//! │  │  ┌─────────────┐  ┌────────────────┐  ┌──────────────┐       │ │
//! │  │  │  Database   │  │  Repositories  │  │  Migrations  │       │ │
//! │  │  │  (pool.rs)  │  │ inventory.rs   │  │  (embedded)  │       │ │
//! │  │  │             │  │ customer.rs    │  │              │       │ │
//! │  │  │ SqlitePool  │◄─│ transaction.rs │  │ 001_init.sql │       │ │
//! │  │  └─────────────┘  └────────────────┘  └──────────────┘       │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  SQLite database file (WAL mode)                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Record Store error types
//! - [`repository`] - Repository implementations (inventory, customer, transaction)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mie_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/kasir.db")).await?;
//! let items = db.inventory().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::transaction::TransactionRepository;
