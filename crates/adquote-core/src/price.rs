//! # Price Module
//!
//! Provides the `Price` type used for every monetary value in adquote.
//!
//! ## Why Not Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICES ARE STORED VERBATIM                                             │
//! │                                                                         │
//! │  Default and special prices are whatever the caller registers,          │
//! │  including non-finite values:                                           │
//! │                                                                         │
//! │    add_special_price(c, Classic, NaN) → get_price(Classic, c) = NaN    │
//! │                                                                         │
//! │  Integer cents cannot hold NaN, so the price is a plain f64.           │
//! │  Totals are plain addition. Rounding to two decimals happens only      │
//! │  when a price is shown to a person.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use adquote_core::price::Price;
//!
//! let classic = Price::new(269.99);
//! let premium = Price::new(394.99);
//!
//! let total: Price = [classic, premium].into_iter().sum();
//! assert!((total.amount() - 664.98).abs() < 1e-9);
//!
//! // Two thirds of the classic price
//! let special = classic.scaled(2.0, 3.0);
//! assert!((special.amount() - 179.993_333).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// =============================================================================
// Price Type
// =============================================================================

/// A monetary amount in major currency units (dollars).
///
/// ## Design Decisions
/// - **f64**: non-finite values must survive storage unchanged
/// - **transparent serde**: serializes as a bare number
/// - **PartialEq only**: NaN is never equal to itself, use
///   [`Price::is_nan`] to check for it
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Creates a price from an amount in dollars.
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Price(amount)
    }

    /// Returns the amount in dollars, unrounded.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Returns a zero price.
    #[inline]
    pub const fn zero() -> Self {
        Price(0.0)
    }

    /// Checks if the value is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is neither infinite nor NaN.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Checks if the value is NaN.
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.0.is_nan()
    }

    /// Scales the price by `numerator / denominator`.
    ///
    /// Multiplies first, then divides, so `scaled(4.0, 5.0)` of 322.99 is
    /// `322.99 * 4.0 / 5.0`.
    ///
    /// ## Example
    /// ```rust
    /// use adquote_core::price::Price;
    ///
    /// let standout = Price::new(322.99);
    /// let myer = standout.scaled(4.0, 5.0);
    /// assert!((myer.amount() - 258.392).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn scaled(&self, numerator: f64, denominator: f64) -> Price {
        Price(self.0 * numerator / denominator)
    }

    /// Rounds to two decimal places, for display.
    #[inline]
    pub fn rounded_to_cents(&self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the price with two decimals.
///
/// ## Note
/// This is for debugging and logs. Customer facing output groups
/// thousands and picks the currency symbol in the CLI.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0.0 {
            write!(f, "-${:.2}", -self.0)
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::zero()
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Price(amount)
    }
}

impl Add for Price {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Price(self.0 + other.0)
    }
}

impl AddAssign for Price {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
