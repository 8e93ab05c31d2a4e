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
//! │  A booking is repriced and reconciled many times over its life.     │
//! │  Float drift across recomputation means "remaining = 0" may never   │
//! │  become true and a customer can never reach FullyPaid.              │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Paise                                        │
//! │    ₹76.70 is 7670 paise. Every recomputation is exact.              │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shutter_core::money::Money;
//!
//! // Create from paise (preferred)
//! let rate = Money::from_paise(100_000); // ₹1,000.00
//!
//! // Arithmetic operations
//! let two_units = rate * 2;                        // ₹2,000.00
//! let with_fee = rate + Money::from_rupees(500);   // ₹1,500.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediates for refund math
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the engine flows through this type:
/// daily rates, service charges, taxes, discounts, request amounts,
/// and the derived advance/remaining balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shutter_core::money::Money;
    ///
    /// let amount = Money::from_paise(767_000); // ₹7,670.00
    /// assert_eq!(amount.paise(), 767_000);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use shutter_core::money::Money;
    ///
    /// let fee = Money::from_rupees(500);
    /// assert_eq!(fee.paise(), 50_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
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

    /// Calculates tax on this amount.
    ///
    /// ## Rounding
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`.
    /// Intermediates are widened to i128 to prevent overflow on large
    /// amounts; the division rounds exactly once, so recomputing the tax
    /// from the same base always yields the same paise.
    ///
    /// ## Example
    /// ```rust
    /// use shutter_core::money::Money;
    /// use shutter_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_rupees(6_500);
    /// let gst = TaxRate::from_bps(1_800); // 18%
    ///
    /// // ₹6,500 × 18% = ₹1,170
    /// assert_eq!(subtotal.calculate_tax(gst), Money::from_rupees(1_170));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(tax_paise as i64)
    }

    /// Returns a basis-point fraction of this amount.
    ///
    /// Used for the hourly add-on rate, which is a fixed fraction of the
    /// per-item daily rate (1500 bps = 15%). Same half-up rounding as
    /// [`Money::calculate_tax`].
    ///
    /// ## Example
    /// ```rust
    /// use shutter_core::money::Money;
    ///
    /// let daily = Money::from_rupees(1_000);
    /// assert_eq!(daily.fraction_bps(1_500), Money::from_rupees(150));
    /// ```
    pub fn fraction_bps(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_paise(part as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shutter_core::money::Money;
    ///
    /// let daily_rate = Money::from_rupees(1_000);
    /// let line_total = daily_rate.multiply_quantity(2);
    /// assert_eq!(line_total, Money::from_rupees(2_000));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Clamps a negative value to zero.
    ///
    /// Derived balances (`remaining_amount`) must never be negative; this
    /// is the single place that rule is applied.
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub const fn min(self, other: Self) -> Self {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. Use frontend formatting for actual UI
/// display to handle locale grouping properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
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

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
