//! # Customer Repository
//!
//! Record Store operations for customers.
//!
//! ## Name Matching
//! Settlement links an order to a customer by EXACT name comparison.
//! SQLite compares TEXT with `=` case-sensitively, so "Budi" and "budi"
//! are two different customers. Loyalty search on the customer screen is
//! the forgiving one (case-insensitive substring over name and phone).

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use mie_core::Customer;

const SELECT_COLUMNS: &str = "id, name, phone, address, total_purchase_rupiah, \
     visits, last_transaction, created_at";

/// Repository for customer operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.customers();
///
/// let all = repo.list().await?;
/// let budi = repo.find_by_name("Budi").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists all customers, sorted by name.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {SELECT_COLUMNS} FROM customers ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Searches customers by name or phone, case-insensitive substring.
    pub async fn search(&self, query: &str) -> DbResult<Vec<Customer>> {
        let query = query.trim();

        debug!(query = %query, "Searching customers");

        if query.is_empty() {
            return self.list().await;
        }

        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {SELECT_COLUMNS} FROM customers \
             WHERE lower(name) LIKE '%' || lower(?1) || '%' \
                OR phone LIKE '%' || ?1 || '%' \
             ORDER BY name"
        ))
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {SELECT_COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Finds a customer by exact name.
    ///
    /// Case-sensitive by design: this is the settlement lookup, and the
    /// original system matched names character-for-character.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {SELECT_COLUMNS} FROM customers WHERE name = ?1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a new customer.
    pub async fn insert(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, name = %customer.name, "Inserting customer");

        sqlx::query(
            "INSERT INTO customers ( \
                id, name, phone, address, total_purchase_rupiah, \
                visits, last_transaction, created_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(customer.total_purchase_rupiah)
        .bind(customer.visits)
        .bind(customer.last_transaction)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing customer (profile edits from the customer screen).
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Customer doesn't exist
    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Updating customer");

        let result = sqlx::query(
            "UPDATE customers SET \
                name = ?2, \
                phone = ?3, \
                address = ?4, \
                total_purchase_rupiah = ?5, \
                visits = ?6, \
                last_transaction = ?7 \
             WHERE id = ?1",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(customer.total_purchase_rupiah)
        .bind(customer.visits)
        .bind(customer.last_transaction)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", &customer.id));
        }

        Ok(())
    }

    /// Deletes a customer.
    ///
    /// Transactions reference customers by name, not by id, so history
    /// survives the delete.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Counts customers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new customer ID.
pub fn generate_customer_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
