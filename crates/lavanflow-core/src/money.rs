//! # Money Module
//!
//! Provides the `Money` type for order totals and revenue figures.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Order totals are summed into the analytics revenue on every request.  │
//! │                                                                         │
//! │  Floating point:  0.1 + 0.2 = 0.30000000000000004                      │
//! │  Integer cents:   10 + 20   = 30                                       │
//! │                                                                         │
//! │  Summation order never changes the revenue figure.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lavanflow_core::money::Money;
//!
//! let price = Money::from_cents(35050); // RD$ 350.50
//! let total = price + price + Money::from_cents(100);
//! assert_eq!(total.cents(), 70200);
//! assert_eq!(total.to_string(), "RD$ 702.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos).
///
/// Serialized as a bare integer, so `{"total": 35050}` on the wire and in
/// the persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// `None` if the sum does not fit.
    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats without the currency symbol, e.g. `350.50`.
    ///
    /// `Display` puts the currency symbol in front of this.
    pub fn to_plain_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", CURRENCY_SYMBOL, self.to_plain_string())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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
    fn test_display() {
        assert_eq!(Money::from_cents(35050).to_string(), "RD$ 350.50");
        assert_eq!(Money::from_cents(500).to_string(), "RD$ 5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "RD$ -5.50");
        assert_eq!(Money::zero().to_string(), "RD$ 0.00");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_cents(1099).to_plain_string(), "10.99");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
    }

    #[test]
    fn test_checked_add_reports_overflow() {
        let half = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(
            Money::from_cents(1).checked_add(Money::from_cents(2)),
            Some(Money::from_cents(3))
        );
        assert_eq!(half.checked_add(half), None);
    }

    #[test]
    fn test_sum_is_order_independent() {
        let values = [
            Money::from_cents(10),
            Money::from_cents(20),
            Money::from_cents(70),
        ];
        let forward: Money = values.iter().sum();
        let backward: Money = values.iter().rev().sum();
        assert_eq!(forward, backward);
        assert_eq!(forward.cents(), 100);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "1250");
    }
}
