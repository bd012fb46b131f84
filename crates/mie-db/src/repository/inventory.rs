//! # Inventory Repository
//!
//! Record Store operations for inventory items.
//!
//! ## Key Operations
//! - CRUD (the store contract)
//! - Substring search for the product screen
//! - Delta stock adjustment for restocking / direct edits
//!
//! ## Stock Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                            │
//! │                                                                     │
//! │  ❌ WRONG: absolute update from a possibly stale read               │
//! │     UPDATE inventory SET stock = 7 WHERE id = ?                     │
//! │                                                                     │
//! │  ✅ CORRECT: delta update                                           │
//! │     UPDATE inventory SET stock = stock - 3 WHERE id = ?             │
//! │                                                                     │
//! │  The CHECK (stock >= 0) constraint rejects any delta that would     │
//! │  drive stock negative, whatever the caller read beforehand.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use mie_core::InventoryItem;

const SELECT_COLUMNS: &str =
    "id, name, stock, price_rupiah, unit, details, created_at, updated_at";

/// Repository for inventory item operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.inventory();
///
/// let items = repo.list().await?;
/// let item = repo.get_by_id("uuid-here").await?;
/// repo.adjust_stock("uuid-here", 25).await?; // restock 25 kg
/// ```
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Lists all inventory items, sorted by name.
    pub async fn list(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {SELECT_COLUMNS} FROM inventory ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Searches items by name, case-insensitive substring match.
    ///
    /// An empty query returns the full list. The catalog here is tens of
    /// products, so a LIKE scan is plenty.
    pub async fn search(&self, query: &str) -> DbResult<Vec<InventoryItem>> {
        let query = query.trim();

        debug!(query = %query, "Searching inventory");

        if query.is_empty() {
            return self.list().await;
        }

        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {SELECT_COLUMNS} FROM inventory \
             WHERE lower(name) LIKE '%' || lower(?1) || '%' \
             ORDER BY name"
        ))
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Search returned items");
        Ok(items)
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {SELECT_COLUMNS} FROM inventory WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new inventory item.
    pub async fn insert(&self, item: &InventoryItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting inventory item");

        sqlx::query(
            "INSERT INTO inventory ( \
                id, name, stock, price_rupiah, unit, details, created_at, updated_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.stock)
        .bind(item.price_rupiah)
        .bind(&item.unit)
        .bind(&item.details)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing item (direct edit from the product screen).
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn update(&self, item: &InventoryItem) -> DbResult<()> {
        debug!(id = %item.id, "Updating inventory item");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE inventory SET \
                name = ?2, \
                stock = ?3, \
                price_rupiah = ?4, \
                unit = ?5, \
                details = ?6, \
                updated_at = ?7 \
             WHERE id = ?1",
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.stock)
        .bind(item.price_rupiah)
        .bind(&item.unit)
        .bind(&item.details)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("InventoryItem", &item.id));
        }

        Ok(())
    }

    /// Adjusts stock by a delta (positive for restocking, negative for
    /// corrections). Settlement does its own decrement inside a single
    /// SQL transaction; this method is for out-of-band edits.
    ///
    /// A delta that would drive stock negative is rejected by the
    /// `CHECK (stock >= 0)` constraint and surfaces as `QueryFailed`.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE inventory SET \
                stock = stock + ?2, \
                updated_at = ?3 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("InventoryItem", id));
        }

        Ok(())
    }

    /// Deletes an item.
    ///
    /// The original system hard-deletes; transaction item snapshots keep
    /// their frozen name and price, so history survives the delete.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting inventory item");

        let result = sqlx::query("DELETE FROM inventory WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("InventoryItem", id));
        }

        Ok(())
    }

    /// Counts inventory items (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new inventory item ID.
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn sample(name: &str, stock: i64, price: Option<i64>) -> InventoryItem {
        let now = Utc::now();
        InventoryItem {
            id: generate_item_id(),
            name: name.to_string(),
            stock,
            price_rupiah: price,
            unit: "kg".to_string(),
            details: None,
            created_at: now,
            updated_at: now,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.inventory();

        let item = sample("Ayam", 10, Some(8_000));
        repo.insert(&item).await.unwrap();

        let fetched = repo.get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Ayam");
        assert_eq!(fetched.stock, 10);
        assert_eq!(fetched.price_rupiah, Some(8_000));

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let db = test_db().await;
        let repo = db.inventory();

        repo.insert(&sample("Bakso", 5, None)).await.unwrap();
        repo.insert(&sample("Ayam", 10, Some(8_000))).await.unwrap();

        let items = repo.list().await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Ayam", "Bakso"]);
    }

    #[tokio::test]
    async fn test_search_case_insensitive() {
        let db = test_db().await;
        let repo = db.inventory();

        repo.insert(&sample("Mie Ayam", 10, None)).await.unwrap();
        repo.insert(&sample("Bakso", 5, None)).await.unwrap();

        let hits = repo.search("ayam").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Mie Ayam");

        // Empty query returns everything
        assert_eq!(repo.search("  ").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_not_found() {
        let db = test_db().await;
        let repo = db.inventory();

        let mut item = sample("Ayam", 10, Some(8_000));
        repo.insert(&item).await.unwrap();

        item.price_rupiah = Some(9_000);
        item.stock = 12;
        repo.update(&item).await.unwrap();

        let fetched = repo.get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.price_rupiah, Some(9_000));
        assert_eq!(fetched.stock, 12);

        item.id = "missing".to_string();
        assert!(matches!(
            repo.update(&item).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_adjust_stock_delta() {
        let db = test_db().await;
        let repo = db.inventory();

        let item = sample("Ayam", 10, None);
        repo.insert(&item).await.unwrap();

        repo.adjust_stock(&item.id, 25).await.unwrap();
        assert_eq!(repo.get_by_id(&item.id).await.unwrap().unwrap().stock, 35);

        repo.adjust_stock(&item.id, -5).await.unwrap();
        assert_eq!(repo.get_by_id(&item.id).await.unwrap().unwrap().stock, 30);
    }

    #[tokio::test]
    async fn test_adjust_stock_cannot_go_negative() {
        let db = test_db().await;
        let repo = db.inventory();

        let item = sample("Ayam", 10, None);
        repo.insert(&item).await.unwrap();

        // CHECK (stock >= 0) rejects the delta
        assert!(repo.adjust_stock(&item.id, -11).await.is_err());
        assert_eq!(repo.get_by_id(&item.id).await.unwrap().unwrap().stock, 10);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.inventory();

        let item = sample("Ayam", 10, None);
        repo.insert(&item).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete(&item.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        assert!(matches!(
            repo.delete(&item.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
