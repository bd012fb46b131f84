//! # Reporting Module
//!
//! Read-only aggregation over already-fetched transaction history.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Reporting Data Flow                             │
//! │                                                                     │
//! │  TransactionRepository::list()  (mie-db, one fetch)                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  &[Transaction]  ──► filter_transactions ──► sales_summary          │
//! │       │                                                             │
//! │       └──► annual_cashback_report (group by customer, 1% cashback)  │
//! │                                                                     │
//! │  Pure, stateless folds. No external calls, no mutation.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::money::{CashbackRate, Money};
use crate::types::Transaction;

// =============================================================================
// Report Types
// =============================================================================

/// One row of the annual cashback report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCashback {
    pub name: String,
    /// Sum of transaction totals for the selected year.
    pub total_purchase_rupiah: i64,
    /// `total_purchase × cashback rate`, rounded half-up.
    pub cashback_rupiah: i64,
}

impl CustomerCashback {
    #[inline]
    pub fn total_purchase(&self) -> Money {
        Money::from_rupiah(self.total_purchase_rupiah)
    }

    #[inline]
    pub fn cashback(&self) -> Money {
        Money::from_rupiah(self.cashback_rupiah)
    }
}

/// Headline numbers for a (possibly filtered) transaction slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_sales_rupiah: i64,
    /// Total units (kg) sold.
    pub total_quantity: i64,
    pub transaction_count: usize,
}

impl SalesSummary {
    #[inline]
    pub fn total_sales(&self) -> Money {
        Money::from_rupiah(self.total_sales_rupiah)
    }
}

// =============================================================================
// Aggregations
// =============================================================================

/// Groups a year's transactions by customer name, sums totals, and applies
/// the cashback rate. Sorted by total purchase descending (name ascending
/// on ties, for a stable report).
///
/// ## Example
/// ```rust,ignore
/// let rows = annual_cashback_report(&transactions, 2024, CashbackRate::default());
/// // [{ name: "Budi", total_purchase: 74_000, cashback: 740 }, ...]
/// ```
pub fn annual_cashback_report(
    transactions: &[Transaction],
    year: i32,
    rate: CashbackRate,
) -> Vec<CustomerCashback> {
    // BTreeMap keeps equal-total customers in name order
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();

    for t in transactions.iter().filter(|t| t.date.year() == year) {
        *totals.entry(t.customer_name.as_str()).or_insert(0) += t.total_rupiah;
    }

    let mut rows: Vec<CustomerCashback> = totals
        .into_iter()
        .map(|(name, total)| CustomerCashback {
            name: name.to_string(),
            total_purchase_rupiah: total,
            cashback_rupiah: rate.apply(Money::from_rupiah(total)).rupiah(),
        })
        .collect();

    rows.sort_by(|a, b| b.total_purchase_rupiah.cmp(&a.total_purchase_rupiah));
    rows
}

/// Computes the dashboard stat-card numbers for a transaction slice.
pub fn sales_summary(transactions: &[Transaction]) -> SalesSummary {
    SalesSummary {
        total_sales_rupiah: transactions.iter().map(|t| t.total_rupiah).sum(),
        total_quantity: transactions.iter().map(|t| t.quantity).sum(),
        transaction_count: transactions.len(),
    }
}

/// Applies the report screen's filters: case-insensitive substring match on
/// customer name, plus an optional exact-date filter.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    name_query: &str,
    date: Option<NaiveDate>,
) -> Vec<&'a Transaction> {
    let query = name_query.to_lowercase();

    transactions
        .iter()
        .filter(|t| t.customer_name.to_lowercase().contains(&query))
        .filter(|t| date.map_or(true, |d| t.date == d))
        .collect()
}

/// Returns the distinct years present in the history, newest first.
/// Used to populate the report year selector.
pub fn available_years(transactions: &[Transaction]) -> Vec<i32> {
    let mut years: Vec<i32> = transactions.iter().map(|t| t.date.year()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn txn(customer: &str, total: i64, quantity: i64, date: &str) -> Transaction {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            customer_name: customer.to_string(),
            quantity,
            price_rupiah: if quantity > 0 { total / quantity } else { 0 },
            total_rupiah: total,
            date: date.parse().unwrap(),
            time: "10:30".to_string(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_annual_cashback_groups_and_applies_rate() {
        // The worked example: two Budi transactions in 2024
        let transactions = vec![
            txn("Budi", 24_000, 3, "2024-03-01"),
            txn("Budi", 50_000, 5, "2024-07-12"),
        ];

        let rows = annual_cashback_report(&transactions, 2024, CashbackRate::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Budi");
        assert_eq!(rows[0].total_purchase_rupiah, 74_000);
        assert_eq!(rows[0].cashback_rupiah, 740);
    }

    #[test]
    fn test_annual_cashback_excludes_other_years() {
        let transactions = vec![
            txn("Budi", 24_000, 3, "2024-03-01"),
            txn("Budi", 99_000, 9, "2023-03-01"),
        ];

        let rows = annual_cashback_report(&transactions, 2024, CashbackRate::default());
        assert_eq!(rows[0].total_purchase_rupiah, 24_000);
    }

    #[test]
    fn test_annual_cashback_sorted_descending() {
        let transactions = vec![
            txn("Ani", 10_000, 1, "2024-01-01"),
            txn("Budi", 50_000, 5, "2024-01-02"),
            txn("Citra", 30_000, 3, "2024-01-03"),
        ];

        let rows = annual_cashback_report(&transactions, 2024, CashbackRate::default());
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Budi", "Citra", "Ani"]);
    }

    #[test]
    fn test_annual_cashback_name_is_case_sensitive() {
        // Same fragility as settlement matching: "budi" != "Budi"
        let transactions = vec![
            txn("Budi", 24_000, 3, "2024-03-01"),
            txn("budi", 10_000, 1, "2024-03-02"),
        ];

        let rows = annual_cashback_report(&transactions, 2024, CashbackRate::default());
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_sales_summary() {
        let transactions = vec![
            txn("Budi", 24_000, 3, "2024-03-01"),
            txn("Ani", 16_000, 2, "2024-03-02"),
        ];

        let summary = sales_summary(&transactions);
        assert_eq!(summary.total_sales().rupiah(), 40_000);
        assert_eq!(summary.total_quantity, 5);
        assert_eq!(summary.transaction_count, 2);
    }

    #[test]
    fn test_filter_by_name_is_case_insensitive_substring() {
        let transactions = vec![
            txn("Budi Santoso", 24_000, 3, "2024-03-01"),
            txn("Ani", 16_000, 2, "2024-03-02"),
        ];

        let filtered = filter_transactions(&transactions, "budi", None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].customer_name, "Budi Santoso");

        // Empty query matches everything
        assert_eq!(filter_transactions(&transactions, "", None).len(), 2);
    }

    #[test]
    fn test_filter_by_exact_date() {
        let transactions = vec![
            txn("Budi", 24_000, 3, "2024-03-01"),
            txn("Budi", 16_000, 2, "2024-03-02"),
        ];

        let date: NaiveDate = "2024-03-02".parse().unwrap();
        let filtered = filter_transactions(&transactions, "", Some(date));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].total_rupiah, 16_000);
    }

    #[test]
    fn test_available_years_newest_first() {
        let transactions = vec![
            txn("Budi", 1, 1, "2023-01-01"),
            txn("Budi", 1, 1, "2025-01-01"),
            txn("Budi", 1, 1, "2024-01-01"),
            txn("Budi", 1, 1, "2024-06-01"),
        ];

        assert_eq!(available_years(&transactions), vec![2025, 2024, 2023]);
    }

    #[test]
    fn test_empty_history() {
        assert!(annual_cashback_report(&[], 2024, CashbackRate::default()).is_empty());
        assert_eq!(sales_summary(&[]).transaction_count, 0);
        assert!(available_years(&[]).is_empty());
    }
}
