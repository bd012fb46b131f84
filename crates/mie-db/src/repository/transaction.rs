//! # Transaction Repository
//!
//! Append-only Record Store for settled transactions.
//!
//! ## Append-Only History
//! Transactions are the financial record. There is no update and no
//! delete here: a settled sale stays settled, and corrections happen
//! as new transactions.
//!
//! ## Snapshot Rows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  transactions          1 ──── n  transaction_items                  │
//! │  (header: who, when,              (lines: frozen name and price     │
//! │   totals, notes)                   per item at settlement time)     │
//! │                                                                     │
//! │  Editing or deleting an inventory item later does NOT change        │
//! │  what any past receipt says.                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use mie_core::{Transaction, TransactionDetail, TransactionItem};

const SELECT_COLUMNS: &str = "id, customer_name, quantity, price_rupiah, \
     total_rupiah, date, time, notes, created_at";

const ITEM_COLUMNS: &str = "id, transaction_id, item_id, name_snapshot, \
     unit_price_rupiah, quantity, line_total_rupiah";

/// Repository for transaction history.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.transactions();
///
/// let history = repo.list().await?;
/// let year = repo.list_by_year(2026).await?;
/// ```
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Lists all transactions, newest first.
    pub async fn list(&self) -> DbResult<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {SELECT_COLUMNS} FROM transactions ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Lists transactions whose sale date falls in the given year.
    ///
    /// Drives the annual cashback report.
    pub async fn list_by_year(&self, year: i32) -> DbResult<Vec<Transaction>> {
        debug!(year = year, "Loading transactions for year");

        // Dates are stored as ISO-8601 TEXT, so the year bounds sort correctly
        let start = NaiveDate::from_ymd_opt(year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year, 12, 31);
        let (Some(start), Some(end)) = (start, end) else {
            return Ok(Vec::new());
        };

        let transactions = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {SELECT_COLUMNS} FROM transactions \
             WHERE date BETWEEN ?1 AND ?2 \
             ORDER BY created_at DESC"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Gets a transaction with its line items.
    ///
    /// ## Returns
    /// * `Ok(Some(detail))` - Transaction found, items attached
    /// * `Ok(None)` - Transaction not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<TransactionDetail>> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {SELECT_COLUMNS} FROM transactions WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(transaction) = transaction else {
            return Ok(None);
        };

        let items = self.items_for(id).await?;

        Ok(Some(TransactionDetail { transaction, items }))
    }

    /// Loads the line item snapshots for a transaction.
    pub async fn items_for(&self, transaction_id: &str) -> DbResult<Vec<TransactionItem>> {
        let items = sqlx::query_as::<_, TransactionItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM transaction_items \
             WHERE transaction_id = ?1 \
             ORDER BY name_snapshot"
        ))
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a transaction header and its line item snapshots atomically.
    ///
    /// Settlement inlines the same statements inside its own transaction;
    /// this method covers standalone inserts (imports, tests).
    pub async fn insert(
        &self,
        transaction: &Transaction,
        items: &[TransactionItem],
    ) -> DbResult<()> {
        debug!(
            id = %transaction.id,
            customer = %transaction.customer_name,
            total = transaction.total_rupiah,
            "Inserting transaction"
        );

        let mut tx = self.pool.begin().await?;

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
        .execute(&mut *tx)
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
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Counts transactions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new transaction ID.
pub fn generate_transaction_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;

    fn sample(customer: &str, total: i64, date: NaiveDate) -> Transaction {
        Transaction {
            id: generate_transaction_id(),
            customer_name: customer.to_string(),
            quantity: 3,
            price_rupiah: total / 3,
            total_rupiah: total,
            date,
            time: "14:05".to_string(),
            notes: Some("Ayam (3kg)".to_string()),
            created_at: Utc::now(),
        }
    }

    fn sample_item(transaction_id: &str) -> TransactionItem {
        TransactionItem {
            id: Uuid::new_v4().to_string(),
            transaction_id: transaction_id.to_string(),
            item_id: "item-1".to_string(),
            name_snapshot: "Ayam".to_string(),
            unit_price_rupiah: 8_000,
            quantity: 3,
            line_total_rupiah: 24_000,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_with_items() {
        let db = test_db().await;
        let repo = db.transactions();

        let tx = sample("Budi", 24_000, date(2026, 8, 23));
        let items = vec![sample_item(&tx.id)];
        repo.insert(&tx, &items).await.unwrap();

        let detail = repo.get_by_id(&tx.id).await.unwrap().unwrap();
        assert_eq!(detail.transaction.customer_name, "Budi");
        assert_eq!(detail.transaction.total_rupiah, 24_000);
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].name_snapshot, "Ayam");

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_year_filters_by_sale_date() {
        let db = test_db().await;
        let repo = db.transactions();

        repo.insert(&sample("Budi", 24_000, date(2026, 3, 1)), &[])
            .await
            .unwrap();
        repo.insert(&sample("Budi", 50_000, date(2026, 12, 31)), &[])
            .await
            .unwrap();
        repo.insert(&sample("Siti", 16_000, date(2025, 7, 7)), &[])
            .await
            .unwrap();

        let year = repo.list_by_year(2026).await.unwrap();
        assert_eq!(year.len(), 2);
        assert!(year.iter().all(|t| t.customer_name == "Budi"));

        assert!(repo.list_by_year(2020).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_item_insert_requires_header() {
        let db = test_db().await;
        let repo = db.transactions();

        // FK rejects an orphan item and rolls back the whole insert
        let tx = sample("Budi", 24_000, date(2026, 8, 23));
        let mut orphan = sample_item(&tx.id);
        orphan.transaction_id = "missing".to_string();

        assert!(repo.insert(&tx, &[orphan]).await.is_err());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
