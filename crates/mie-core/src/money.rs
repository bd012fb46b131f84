//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  The original cashier app divided a subtotal by a quantity in       │
//! │  floats and re-multiplied, silently drifting by fractions of a      │
//! │  rupiah on mixed-price orders.                                      │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Rupiah                                       │
//! │    The rupiah has no minor unit in practice, so every amount in     │
//! │    the system is a whole-rupiah i64. Totals are exact sums of       │
//! │    line totals; derived per-unit prices are display-only.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mie_core::money::Money;
//!
//! let price = Money::from_rupiah(8_000); // Rp 8.000 per kg
//!
//! let line_total = price.multiply_quantity(3); // Rp 24.000
//! assert_eq!(line_total.rupiah(), 24_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole Indonesian rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// InventoryItem.price ──► effective_price ──► line total
///                                                │
///                                                ▼
///            Transaction.total ──► Customer.total_purchase ──► cashback
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupiah.
    ///
    /// ## Example
    /// ```rust
    /// use mie_core::money::Money;
    ///
    /// let price = Money::from_rupiah(8_000);
    /// assert_eq!(price.rupiah(), 8_000);
    /// ```
    #[inline]
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Money(rupiah)
    }

    /// Returns the value in whole rupiah.
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use mie_core::money::Money;
    ///
    /// let unit_price = Money::from_rupiah(8_000);
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.rupiah(), 24_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Divides money evenly over a quantity, truncating toward zero.
    ///
    /// ## Precision
    /// The remainder is intentionally dropped. Used only for the derived,
    /// display-only per-unit price on a transaction; the stored total is
    /// always the exact sum of line totals.
    ///
    /// Returns zero when `qty` is zero.
    #[inline]
    pub const fn divide_quantity(&self, qty: i64) -> Self {
        if qty == 0 {
            Money(0)
        } else {
            Money(self.0 / qty)
        }
    }
}

// =============================================================================
// Cashback Rate
// =============================================================================

/// Cashback rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 100 bps = 1% (the store's standing annual cashback rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashbackRate(u32);

impl CashbackRate {
    /// Creates a cashback rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        CashbackRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Applies the rate to an amount, rounding half-up in integer math.
    ///
    /// ## Implementation
    /// `(amount * bps + 5000) / 10000` with i128 intermediates to prevent
    /// overflow on large annual totals.
    ///
    /// ## Example
    /// ```rust
    /// use mie_core::money::{CashbackRate, Money};
    ///
    /// let rate = CashbackRate::from_bps(100); // 1%
    /// let total = Money::from_rupiah(74_000);
    /// assert_eq!(rate.apply(total).rupiah(), 740);
    /// ```
    pub fn apply(&self, amount: Money) -> Money {
        let cashback = (amount.rupiah() as i128 * self.0 as i128 + 5000) / 10000;
        Money::from_rupiah(cashback as i64)
    }
}

impl Default for CashbackRate {
    /// The store's fixed 1% annual cashback.
    fn default() -> Self {
        CashbackRate(100)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money the way the receipts do:
/// `Rp 8.000` with dot thousands grouping (id-ID convention).
///
/// ## Note
/// This is for receipts and debugging; any frontend should format from
/// the raw rupiah value to handle localization itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp {}", sign, group_thousands(self.0.unsigned_abs()))
    }
}

/// Groups a number with dots every three digits: 1234567 → "1.234.567".
fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while value > 0 {
        groups.push((value % 1000, value >= 1000));
        value /= 1000;
    }
    groups
        .iter()
        .rev()
        .map(|(g, pad)| {
            if *pad {
                format!("{:03}", g)
            } else {
                g.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money values (report folds).
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
