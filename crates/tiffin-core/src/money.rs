//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Menu prices arrive from the backend as decimal rupees:                 │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  A cart total summed in f64 drifts after enough adds/removes.           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹149.60 is stored as 14960 paise                                     │
//! │    Totals are exact integer sums                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! On the wire (serde, TypeScript) `Money` is a plain decimal rupee number,
//! the same shape the backend and the UI already use for `price` and `total`.
//!
//! ## Usage
//! ```rust
//! use tiffin_core::money::Money;
//!
//! let price = Money::from_rupees(149.6);
//! assert_eq!(price.paise(), 14960);
//!
//! let total = price * 2 + Money::from_paise(500);
//! assert_eq!(total.paise(), 30420);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::currency::{to_fixed_2, CURRENCY_SYMBOL};

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount held in paise (1/100 rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as rupees**: `{"total": 149.6}` rather than `14960`
/// - **Saturating arithmetic**: a huge quantity pins the total at the i64
///   bound instead of panicking or wrapping
///
/// ## Where Money is Used
/// ```text
/// MenuItem.price (f64 rupees) ──► CartLine.price (frozen Money)
///                                       │
///                                       ▼
///                     CartLine.line_total() ──► Cart.total ──► "₹300.00"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tiffin_core::money::Money;
    ///
    /// let price = Money::from_paise(14960); // ₹149.60
    /// assert_eq!(price.paise(), 14960);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from a decimal rupee amount.
    ///
    /// The amount is rounded to the nearest paisa, half away from zero on
    /// the exact binary value (the same rounding as
    /// [`crate::currency::format_price_with_decimals`]). Out-of-range and
    /// infinite input saturates at the i64 bound; `NaN` becomes zero.
    ///
    /// ## Example
    /// ```rust
    /// use tiffin_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(149.6).paise(), 14960);
    /// assert_eq!(Money::from_rupees(0.125).paise(), 13);
    /// ```
    pub fn from_rupees(rupees: f64) -> Self {
        match to_fixed_2(rupees).replace('.', "").parse::<i64>() {
            Ok(paise) => Money(paise),
            Err(_) if rupees.is_nan() => Money::zero(),
            Err(_) if rupees.is_sign_negative() => Money(i64::MIN),
            Err(_) => Money(i64::MAX),
        }
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the value as decimal rupees (for the wire and for display math).
    #[inline]
    pub fn rupees(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use tiffin_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(14960).rupees_part(), 149);
    /// assert_eq!(Money::from_paise(-550).rupees_part(), -5);
    /// ```
    #[inline]
    pub const fn rupees_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
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
    /// use tiffin_core::money::Money;
    ///
    /// let unit_price = Money::from_rupees(120.5);
    /// assert_eq!(unit_price.multiply_quantity(3).paise(), 36150);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal rupee form, e.g. `₹149.60`.
///
/// Matches [`crate::currency::format_price_with_decimals`]: the sign follows
/// the currency glyph (`₹-5.50`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            CURRENCY_SYMBOL,
            sign,
            self.rupees_part().abs(),
            self.paise_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.rupees()
    }
}

impl From<f64> for Money {
    fn from(rupees: f64) -> Self {
        Money::from_rupees(rupees)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summing line totals into a cart total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees_rounds_to_paise() {
        assert_eq!(Money::from_rupees(149.6).paise(), 14960);
        assert_eq!(Money::from_rupees(100.0).paise(), 10000);
        // 1.005 is 1.00499999... in binary
        assert_eq!(Money::from_rupees(1.005).paise(), 100);
        assert_eq!(Money::from_rupees(-5.5).paise(), -550);
        assert_eq!(Money::from_rupees(f64::NAN).paise(), 0);
    }

    #[test]
    fn test_from_rupees_rounds_exact_binary_value() {
        assert_eq!(Money::from_rupees(0.015).paise(), 1);
        assert_eq!(Money::from_rupees(0.045).paise(), 4);
        assert_eq!(Money::from_rupees(0.125).paise(), 13);
        assert_eq!(Money::from_rupees(-0.125).paise(), -13);
    }

    #[test]
    fn test_from_rupees_saturates() {
        assert_eq!(Money::from_rupees(1e17).paise(), i64::MAX);
        assert_eq!(Money::from_rupees(f64::INFINITY).paise(), i64::MAX);
        assert_eq!(Money::from_rupees(f64::NEG_INFINITY).paise(), i64::MIN);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let price = Money::from_rupees(100.0);
        assert_eq!(price.multiply_quantity(i64::MAX / 10).paise(), i64::MAX);
        assert_eq!((price * i64::MAX).paise(), i64::MAX);
        assert_eq!((Money::from_paise(i64::MAX) + price).paise(), i64::MAX);
        assert_eq!((Money::from_paise(i64::MIN) - price).paise(), i64::MIN);

        let total: Money = [Money::from_paise(i64::MAX), price].iter().sum();
        assert_eq!(total.paise(), i64::MAX);
    }

    #[test]
    fn test_parts() {
        let money = Money::from_paise(14960);
        assert_eq!(money.rupees_part(), 149);
        assert_eq!(money.paise_part(), 60);
        assert!((money.rupees() - 149.6).abs() < f64::EPSILON);

        let negative = Money::from_paise(-550);
        assert_eq!(negative.rupees_part(), -5);
        assert_eq!(negative.paise_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(14960).to_string(), "₹149.60");
        assert_eq!(Money::from_paise(500).to_string(), "₹5.00");
        assert_eq!(Money::from_paise(-550).to_string(), "₹-5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3).paise(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_paise(100);
        assert_eq!(c.paise(), 1400);
    }

    #[test]
    fn test_sum_is_exact() {
        // 0.1 + 0.2 in f64 is 0.30000000000000004
        let total: Money = [Money::from_rupees(0.1), Money::from_rupees(0.2)]
            .iter()
            .sum();
        assert_eq!(total, Money::from_rupees(0.3));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::default();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_paise(100).is_positive());
        assert!(Money::from_paise(-100).is_negative());
    }

    #[test]
    fn test_serializes_as_rupees() {
        let json = serde_json::to_string(&Money::from_paise(14960)).unwrap();
        assert_eq!(json, "149.6");

        let money: Money = serde_json::from_str("300").unwrap();
        assert_eq!(money.paise(), 30000);
    }
}
