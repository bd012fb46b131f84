//! # Settlement Service
//!
//! The write path: turns a proposed order into a durable transaction.
//!
//! ## Settlement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       settle_order                                  │
//! │                                                                     │
//! │  1. Validate input (name present, lines non-empty, qty in range)    │
//! │          │  no I/O yet; bad input never touches the store           │
//! │          ▼                                                          │
//! │  2. BEGIN one SQL transaction                                       │
//! │          │                                                          │
//! │          ▼                                                          │
//! │  3. Per line, in order:                                             │
//! │     ├── re-read the item (fresh stock, not the caller's copy)       │
//! │     ├── stock - qty < 0?  → InsufficientStock, ROLLBACK everything  │
//! │     ├── resolve price (item price, else store default)              │
//! │     └── UPDATE stock = stock - qty                                  │
//! │          │                                                          │
//! │          ▼                                                          │
//! │  4. INSERT transaction header + item snapshots                      │
//! │          │                                                          │
//! │          ▼                                                          │
//! │  5. Upsert customer by exact name                                   │
//! │     ├── found:   total += order total, visits += 1, last txn date   │
//! │     └── missing: new customer seeded from this order                │
//! │          │                                                          │
//! │          ▼                                                          │
//! │  6. COMMIT. Any earlier failure dropped the transaction and rolled  │
//! │     everything back, including already-applied line decrements.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Non-Idempotence
//! Settling the same order twice produces two transactions and decrements
//! stock twice. Deduplication is the caller's job.

use chrono::Utc;
use sqlx::{Sqlite, Transaction as SqlTx};
use tracing::{debug, info};
use uuid::Uuid;

use mie_core::pricing::{effective_price, order_note};
use mie_core::report::{
    annual_cashback_report, available_years, sales_summary, CustomerCashback, SalesSummary,
};
use mie_core::validation::validate_order;
use mie_core::{
    CoreError, Customer, InventoryItem, Money, Order, StoreSettings, Transaction,
    TransactionDetail, TransactionItem,
};
use mie_db::Database;

use crate::error::SettlementResult;

/// Orchestrates order settlement and report assembly.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("kasir.db")).await?;
/// let service = SettlementService::with_defaults(db);
///
/// let receipt = service.settle_order(&order).await?;
/// println!("Total: {}", receipt.transaction.total());
/// ```
#[derive(Debug, Clone)]
pub struct SettlementService {
    db: Database,
    settings: StoreSettings,
}

impl SettlementService {
    /// Creates a settlement service with explicit store settings.
    pub fn new(db: Database, settings: StoreSettings) -> Self {
        SettlementService { db, settings }
    }

    /// Creates a settlement service with the store's default configuration
    /// (Mie Wiwiek, Rp 8.000/kg default, 1% cashback).
    pub fn with_defaults(db: Database) -> Self {
        SettlementService::new(db, StoreSettings::default())
    }

    /// Returns the active store settings.
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    // =========================================================================
    // Settlement
    // =========================================================================

    /// Settles a proposed order.
    ///
    /// All mutations run inside one SQL transaction: if any line has
    /// insufficient stock, or any statement fails, the whole settlement
    /// rolls back and the store is exactly as it was.
    ///
    /// ## Returns
    /// The durable transaction with its line item snapshots (receipt data).
    pub async fn settle_order(&self, order: &Order) -> SettlementResult<TransactionDetail> {
        validate_order(order)?;

        debug!(
            customer = %order.customer_name,
            lines = order.lines.len(),
            "Settling order"
        );

        let now = Utc::now();
        let transaction_id = Uuid::new_v4().to_string();

        let mut tx = self.db.pool().begin().await?;

        // Phase 1: per line, re-read stock inside the transaction, check,
        // price, and decrement. Duplicate lines for the same item work
        // because each re-read sees the previous line's decrement.
        let mut items: Vec<TransactionItem> = Vec::with_capacity(order.lines.len());
        let mut total = Money::zero();
        let mut total_quantity: i64 = 0;

        for line in &order.lines {
            let item = fetch_item(&mut tx, &line.item_id)
                .await?
                .ok_or_else(|| CoreError::ItemNotFound(line.item_id.clone()))?;

            if !item.can_fulfill(line.quantity) {
                // Dropping `tx` rolls back decrements from earlier lines
                return Err(CoreError::InsufficientStock {
                    item_id: item.id,
                    name: item.name,
                    available: item.stock,
                    requested: line.quantity,
                }
                .into());
            }

            let unit_price = effective_price(&item, self.settings.default_price());
            let line_total = unit_price.multiply_quantity(line.quantity);

            sqlx::query(
                "UPDATE inventory SET stock = stock - ?2, updated_at = ?3 WHERE id = ?1",
            )
            .bind(&item.id)
            .bind(line.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            items.push(TransactionItem {
                id: Uuid::new_v4().to_string(),
                transaction_id: transaction_id.clone(),
                item_id: item.id,
                name_snapshot: item.name,
                unit_price_rupiah: unit_price.rupiah(),
                quantity: line.quantity,
                line_total_rupiah: line_total.rupiah(),
            });

            total += line_total;
            total_quantity += line.quantity;
        }

        // Phase 2: durable transaction record.
        // The per-unit price is derived for display; the total is exact.
        let transaction = Transaction {
            id: transaction_id,
            customer_name: order.customer_name.clone(),
            quantity: total_quantity,
            price_rupiah: total.divide_quantity(total_quantity).rupiah(),
            total_rupiah: total.rupiah(),
            date: now.date_naive(),
            time: now.format("%H:%M").to_string(),
            notes: Some(order_note(&items, "kg")),
            created_at: now,
        };

        insert_transaction(&mut tx, &transaction, &items).await?;

        // Phase 3: customer aggregates, matched by exact name.
        upsert_customer(&mut tx, &transaction).await?;

        tx.commit().await?;

        info!(
            id = %transaction.id,
            customer = %transaction.customer_name,
            total = transaction.total_rupiah,
            quantity = transaction.quantity,
            "Order settled"
        );

        Ok(TransactionDetail { transaction, items })
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Builds the annual cashback report for a year.
    ///
    /// Groups the year's transactions by customer name, sums purchase
    /// totals, and applies the configured cashback rate. Rows sorted by
    /// total descending.
    pub async fn annual_report(&self, year: i32) -> SettlementResult<Vec<CustomerCashback>> {
        let transactions = self.db.transactions().list_by_year(year).await?;
        Ok(annual_cashback_report(
            &transactions,
            year,
            self.settings.cashback_rate,
        ))
    }

    /// Computes the dashboard numbers over the full history.
    pub async fn summary(&self) -> SettlementResult<SalesSummary> {
        let transactions = self.db.transactions().list().await?;
        Ok(sales_summary(&transactions))
    }

    /// Lists the years with at least one transaction, newest first.
    pub async fn report_years(&self) -> SettlementResult<Vec<i32>> {
        let transactions = self.db.transactions().list().await?;
        Ok(available_years(&transactions))
    }
}

// =============================================================================
// Transaction-Scoped Statements
// =============================================================================
// These run against the settlement's own SQL transaction, not the pool, so
// they see (and join) its uncommitted writes.

async fn fetch_item(
    tx: &mut SqlTx<'_, Sqlite>,
    item_id: &str,
) -> SettlementResult<Option<InventoryItem>> {
    let item = sqlx::query_as::<_, InventoryItem>(
        "SELECT id, name, stock, price_rupiah, unit, details, created_at, updated_at \
         FROM inventory WHERE id = ?1",
    )
    .bind(item_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(item)
}

async fn insert_transaction(
    tx: &mut SqlTx<'_, Sqlite>,
    transaction: &Transaction,
    items: &[TransactionItem],
) -> SettlementResult<()> {
    sqlx::query(
        "INSERT INTO transactions ( \
            id, customer_name, quantity, price_rupiah, total_rupiah, \
            date, time, notes, created_at \
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(&transaction.id)
    .bind(&transaction.customer_name)
    .bind(transaction.quantity)
    .bind(transaction.price_rupiah)
    .bind(transaction.total_rupiah)
    .bind(transaction.date)
    .bind(&transaction.time)
    .bind(&transaction.notes)
    .bind(transaction.created_at)
    .execute(&mut **tx)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO transaction_items ( \
                id, transaction_id, item_id, name_snapshot, \
                unit_price_rupiah, quantity, line_total_rupiah \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&item.id)
        .bind(&item.transaction_id)
        .bind(&item.item_id)
        .bind(&item.name_snapshot)
        .bind(item.unit_price_rupiah)
        .bind(item.quantity)
        .bind(item.line_total_rupiah)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Updates the matched customer's running aggregates, or creates a new
/// customer seeded from this transaction.
///
/// The match is exact and case-sensitive. "budi" and "Budi" are two
/// customers, as in the source system.
async fn upsert_customer(
    tx: &mut SqlTx<'_, Sqlite>,
    transaction: &Transaction,
) -> SettlementResult<()> {
    let existing = sqlx::query_as::<_, Customer>(
        "SELECT id, name, phone, address, total_purchase_rupiah, \
         visits, last_transaction, created_at \
         FROM customers WHERE name = ?1",
    )
    .bind(&transaction.customer_name)
    .fetch_optional(&mut **tx)
    .await?;

    match existing {
        Some(customer) => {
            debug!(customer_id = %customer.id, "Updating existing customer aggregates");

            sqlx::query(
                "UPDATE customers SET \
                    total_purchase_rupiah = total_purchase_rupiah + ?2, \
                    visits = visits + 1, \
                    last_transaction = ?3 \
                 WHERE id = ?1",
            )
            .bind(&customer.id)
            .bind(transaction.total_rupiah)
            .bind(transaction.date)
            .execute(&mut **tx)
            .await?;
        }
        None => {
            debug!(name = %transaction.customer_name, "Creating customer from first purchase");

            // Phone and address start empty and get filled in later from
            // the customer screen
            sqlx::query(
                "INSERT INTO customers ( \
                    id, name, phone, address, total_purchase_rupiah, \
                    visits, last_transaction, created_at \
                 ) VALUES (?1, ?2, '', '', ?3, 1, ?4, ?5)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&transaction.customer_name)
            .bind(transaction.total_rupiah)
            .bind(transaction.date)
            .bind(transaction.created_at)
            .execute(&mut **tx)
            .await?;
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SettlementError;
    use chrono::Datelike;
    use mie_core::OrderLine;
    use mie_db::DbConfig;

    async fn service() -> SettlementService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        SettlementService::with_defaults(db)
    }

    async fn seed_item(
        svc: &SettlementService,
        name: &str,
        stock: i64,
        price: Option<i64>,
    ) -> String {
        let now = Utc::now();
        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            stock,
            price_rupiah: price,
            unit: "kg".to_string(),
            details: None,
            created_at: now,
            updated_at: now,
        };
        svc.db.inventory().insert(&item).await.unwrap();
        item.id
    }

    fn order(customer: &str, lines: Vec<(&str, i64)>) -> Order {
        Order {
            customer_name: customer.to_string(),
            lines: lines
                .into_iter()
                .map(|(id, qty)| OrderLine {
                    item_id: id.to_string(),
                    quantity: qty,
                })
                .collect(),
        }
    }

    async fn stock_of(svc: &SettlementService, id: &str) -> i64 {
        svc.db.inventory().get_by_id(id).await.unwrap().unwrap().stock
    }

    #[tokio::test]
    async fn test_settle_ayam_order_for_new_customer() {
        // The worked example: Ayam stock 10 at Rp 8.000/kg, Budi buys 3 kg
        let svc = service().await;
        let ayam = seed_item(&svc, "Ayam", 10, Some(8_000)).await;

        let receipt = svc.settle_order(&order("Budi", vec![(&ayam, 3)])).await.unwrap();

        assert_eq!(receipt.transaction.customer_name, "Budi");
        assert_eq!(receipt.transaction.quantity, 3);
        assert_eq!(receipt.transaction.price_rupiah, 8_000);
        assert_eq!(receipt.transaction.total_rupiah, 24_000);
        assert_eq!(receipt.transaction.notes.as_deref(), Some("Ayam (3kg)"));
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].name_snapshot, "Ayam");
        assert_eq!(receipt.items[0].line_total_rupiah, 24_000);

        // Stock decremented
        assert_eq!(stock_of(&svc, &ayam).await, 7);

        // New customer seeded from the purchase
        let budi = svc.db.customers().find_by_name("Budi").await.unwrap().unwrap();
        assert_eq!(budi.total_purchase_rupiah, 24_000);
        assert_eq!(budi.visits, 1);
        assert_eq!(budi.last_transaction, Some(receipt.transaction.date));
        assert_eq!(budi.phone, "");
        assert_eq!(budi.address, "");

        // Durable and readable back with items
        let detail = svc
            .db
            .transactions()
            .get_by_id(&receipt.transaction.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.items.len(), 1);
    }

    #[tokio::test]
    async fn test_existing_customer_aggregates_accumulate() {
        let svc = service().await;
        let ayam = seed_item(&svc, "Ayam", 10, Some(8_000)).await;

        // Budi exists with a profile; settlement must not touch phone/address
        let budi = Customer {
            id: Uuid::new_v4().to_string(),
            name: "Budi".to_string(),
            phone: "0812345".to_string(),
            address: "Jl. Melati 5".to_string(),
            total_purchase_rupiah: 50_000,
            visits: 2,
            last_transaction: None,
            created_at: Utc::now(),
        };
        svc.db.customers().insert(&budi).await.unwrap();

        svc.settle_order(&order("Budi", vec![(&ayam, 3)])).await.unwrap();

        let after = svc.db.customers().get_by_id(&budi.id).await.unwrap().unwrap();
        assert_eq!(after.total_purchase_rupiah, 74_000);
        assert_eq!(after.visits, 3);
        assert!(after.last_transaction.is_some());
        assert_eq!(after.phone, "0812345");
        assert_eq!(after.address, "Jl. Melati 5");

        // No second Budi was created
        assert_eq!(svc.db.customers().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_name_match_is_case_sensitive() {
        let svc = service().await;
        let ayam = seed_item(&svc, "Ayam", 10, Some(8_000)).await;

        svc.settle_order(&order("Budi", vec![(&ayam, 1)])).await.unwrap();
        svc.settle_order(&order("budi", vec![(&ayam, 1)])).await.unwrap();

        // Different strings, different customers
        assert_eq!(svc.db.customers().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insufficient_stock_rejects_and_leaves_store_untouched() {
        let svc = service().await;
        let ayam = seed_item(&svc, "Ayam", 10, Some(8_000)).await;

        let err = svc
            .settle_order(&order("Budi", vec![(&ayam, 12)]))
            .await
            .unwrap_err();

        match err {
            SettlementError::Core(CoreError::InsufficientStock {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 10);
                assert_eq!(requested, 12);
            }
            other => panic!("unexpected error: {other}"),
        }

        assert_eq!(stock_of(&svc, &ayam).await, 10);
        assert_eq!(svc.db.transactions().count().await.unwrap(), 0);
        assert_eq!(svc.db.customers().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failing_line_rolls_back_earlier_decrements() {
        let svc = service().await;
        let ayam = seed_item(&svc, "Ayam", 10, Some(8_000)).await;
        let bakso = seed_item(&svc, "Bakso", 2, Some(10_000)).await;

        // First line fits, second doesn't
        let err = svc
            .settle_order(&order("Budi", vec![(&ayam, 3), (&bakso, 5)]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SettlementError::Core(CoreError::InsufficientStock { .. })
        ));

        // The Ayam decrement was rolled back with everything else
        assert_eq!(stock_of(&svc, &ayam).await, 10);
        assert_eq!(stock_of(&svc, &bakso).await, 2);
        assert_eq!(svc.db.transactions().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_item_rejected() {
        let svc = service().await;

        let err = svc
            .settle_order(&order("Budi", vec![("missing-id", 1)]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SettlementError::Core(CoreError::ItemNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_before_any_write() {
        let svc = service().await;
        let ayam = seed_item(&svc, "Ayam", 10, Some(8_000)).await;

        assert!(svc.settle_order(&order("", vec![(&ayam, 3)])).await.is_err());
        assert!(svc.settle_order(&order("Budi", vec![])).await.is_err());
        assert!(svc.settle_order(&order("Budi", vec![(&ayam, 0)])).await.is_err());

        assert_eq!(stock_of(&svc, &ayam).await, 10);
        assert_eq!(svc.db.transactions().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_default_price_fallback_and_multi_line_totals() {
        let svc = service().await;
        let ayam = seed_item(&svc, "Ayam", 10, Some(10_000)).await;
        let sawi = seed_item(&svc, "Sawi", 10, None).await; // default Rp 8.000/kg

        let receipt = svc
            .settle_order(&order("Budi", vec![(&ayam, 2), (&sawi, 3)]))
            .await
            .unwrap();

        // 2 × 10.000 + 3 × 8.000 = 44.000 across 5 kg
        assert_eq!(receipt.transaction.total_rupiah, 44_000);
        assert_eq!(receipt.transaction.quantity, 5);
        // Derived per-unit price truncates (44.000 / 5 = 8.800)
        assert_eq!(receipt.transaction.price_rupiah, 8_800);
        assert_eq!(
            receipt.transaction.notes.as_deref(),
            Some("Ayam (2kg), Sawi (3kg)")
        );

        let sawi_line = receipt
            .items
            .iter()
            .find(|i| i.name_snapshot == "Sawi")
            .unwrap();
        assert_eq!(sawi_line.unit_price_rupiah, 8_000);
        assert_eq!(sawi_line.line_total_rupiah, 24_000);
    }

    #[tokio::test]
    async fn test_settlement_is_not_idempotent() {
        let svc = service().await;
        let ayam = seed_item(&svc, "Ayam", 10, Some(8_000)).await;
        let o = order("Budi", vec![(&ayam, 3)]);

        svc.settle_order(&o).await.unwrap();
        svc.settle_order(&o).await.unwrap();

        // Two distinct transactions, stock decremented twice
        assert_eq!(svc.db.transactions().count().await.unwrap(), 2);
        assert_eq!(stock_of(&svc, &ayam).await, 4);

        let budi = svc.db.customers().find_by_name("Budi").await.unwrap().unwrap();
        assert_eq!(budi.visits, 2);
        assert_eq!(budi.total_purchase_rupiah, 48_000);
    }

    #[tokio::test]
    async fn test_duplicate_lines_share_the_same_stock() {
        // Two lines for the same item: the second re-read sees the first
        // line's decrement, so together they cannot overdraw the stock
        let svc = service().await;
        let ayam = seed_item(&svc, "Ayam", 10, Some(8_000)).await;

        let err = svc
            .settle_order(&order("Budi", vec![(&ayam, 6), (&ayam, 6)]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SettlementError::Core(CoreError::InsufficientStock { .. })
        ));
        assert_eq!(stock_of(&svc, &ayam).await, 10);
        assert_eq!(svc.db.transactions().count().await.unwrap(), 0);

        // 5 + 5 fits exactly and drains the stock to zero
        let receipt = svc
            .settle_order(&order("Budi", vec![(&ayam, 5), (&ayam, 5)]))
            .await
            .unwrap();
        assert_eq!(receipt.transaction.quantity, 10);
        assert_eq!(receipt.transaction.total_rupiah, 80_000);
        assert_eq!(stock_of(&svc, &ayam).await, 0);
    }

    #[tokio::test]
    async fn test_exact_stock_consumption_allowed() {
        let svc = service().await;
        let ayam = seed_item(&svc, "Ayam", 3, Some(8_000)).await;

        svc.settle_order(&order("Budi", vec![(&ayam, 3)])).await.unwrap();
        assert_eq!(stock_of(&svc, &ayam).await, 0);
    }

    #[tokio::test]
    async fn test_annual_report_over_settled_history() {
        let svc = service().await;
        let ayam = seed_item(&svc, "Ayam", 100, Some(8_000)).await;

        svc.settle_order(&order("Budi", vec![(&ayam, 3)])).await.unwrap(); // 24.000
        svc.settle_order(&order("Budi", vec![(&ayam, 5)])).await.unwrap(); // 40.000
        svc.settle_order(&order("Ani", vec![(&ayam, 1)])).await.unwrap(); // 8.000

        let year = Utc::now().date_naive().year();
        let rows = svc.annual_report(year).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Budi");
        assert_eq!(rows[0].total_purchase_rupiah, 64_000);
        assert_eq!(rows[0].cashback_rupiah, 640);
        assert_eq!(rows[1].name, "Ani");
        assert_eq!(rows[1].cashback_rupiah, 80);

        assert!(svc.annual_report(year - 1).await.unwrap().is_empty());
        assert_eq!(svc.report_years().await.unwrap(), vec![year]);

        let summary = svc.summary().await.unwrap();
        assert_eq!(summary.total_sales_rupiah, 72_000);
        assert_eq!(summary.total_quantity, 9);
        assert_eq!(summary.transaction_count, 3);
    }
}
