//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many checkout systems:                                              │
//! │    Rp 1.000.000 / 3 = Rp 333.333,33… → What do we charge?              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Rupiah                                           │
//! │    1_000_000 / 3 = 333_333 per period (×3 = 999_999)                   │
//! │    We KNOW the schedule is 1 rupiah short, and keep it that way       │
//! │    because changing it would change what customers pay                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rupiah has no minor unit in this system (sen are long obsolete), so
//! `Money` counts whole rupiah rather than cents.
//!
//! ## Usage
//! ```rust
//! use lunas_core::money::Money;
//!
//! // Create from whole rupiah (the only constructor)
//! let price = Money::from_rupiah(1_500_000);
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! let total = price + Money::from_rupiah(500_000);
//! assert_eq!(total.rupiah(), 2_000_000);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(1500000.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support, so it serializes as a plain number
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.price ──► tier selection ──► base price ──► discount          │
/// │                                            │                            │
/// │                                            ▼                            │
/// │  subtotal ──► PPN ──► grand total ──► installment schedule             │
/// │                                                                         │
/// │  EVERY rupiah a customer pays flows through this type                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupiah.
    ///
    /// ## Example
    /// ```rust
    /// use lunas_core::money::Money;
    ///
    /// let price = Money::from_rupiah(1_000_000);
    /// assert_eq!(price.rupiah(), 1_000_000);
    /// ```
    ///
    /// ## Why Whole Rupiah?
    /// Prices, coupons, and installment amounts are all authored as whole
    /// rupiah upstream. Using the same unit end to end eliminates every
    /// floating-point concern. Only the UI adds thousand separators.
    #[inline]
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Money(rupiah)
    }

    /// Returns the value in whole rupiah.
    ///
    /// ## Example
    /// ```rust
    /// use lunas_core::money::Money;
    ///
    /// let price = Money::from_rupiah(250_000);
    /// assert_eq!(price.rupiah(), 250_000);
    /// ```
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use lunas_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert_eq!(zero.rupiah(), 0);
    /// assert!(zero.is_zero());
    /// ```
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the given percentage of this amount.
    ///
    /// ## Arguments
    /// * `bps` - Percentage in basis points (1100 = 11%)
    ///
    /// ## Implementation
    /// We use integer math: `(amount * bps + 5000) / 10000`
    /// The +5000 provides rounding to the nearest rupiah (5000/10000 = 0.5).
    /// i128 intermediates prevent overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use lunas_core::money::Money;
    ///
    /// let base = Money::from_rupiah(900_000);
    /// let eleven_percent = base.percentage(1100);
    /// assert_eq!(eleven_percent.rupiah(), 99_000);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_rupiah(part as i64)
    }

    /// Calculates tax for this amount.
    ///
    /// ## PPN Context
    /// ```text
    /// Subtotal: Rp 900.000
    ///      │
    ///      ▼
    /// calculate_tax(PPN 11%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: Rp 99.000
    ///      │
    ///      ▼
    /// Grand Total: Rp 999.000
    /// ```
    ///
    /// Tax always applies to the subtotal AFTER discounts; the invariant
    /// lives in the pricing pipeline, not here.
    ///
    /// ## Example
    /// ```rust
    /// use lunas_core::money::Money;
    /// use lunas_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_rupiah(1_000_000);
    /// let rate = TaxRate::from_percentage(11.0); // PPN 11%
    ///
    /// let tax = subtotal.calculate_tax(rate);
    /// assert_eq!(tax.rupiah(), 110_000);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage(rate.bps())
    }

    /// Splits this amount into equal periods, flooring each period.
    ///
    /// ## Deliberate Shortfall
    /// `Rp 1.000.000 / 3 = Rp 333.333` per period, which sums to
    /// `Rp 999.999`. The missing rupiah is NOT redistributed; the observed
    /// billing behavior floors every period and we preserve it bit-exact.
    ///
    /// ## Example
    /// ```rust
    /// use lunas_core::money::Money;
    ///
    /// let grand_total = Money::from_rupiah(1_000_000);
    /// let per_period = grand_total.split_even(3);
    /// assert_eq!(per_period.rupiah(), 333_333);
    /// ```
    ///
    /// `parts` must be greater than zero; callers gate on the installment
    /// count before splitting.
    #[inline]
    pub const fn split_even(&self, parts: i64) -> Money {
        Money(self.0 / parts)
    }

    /// Formats the amount the way the storefront shows it: `Rp 1.000.000`.
    ///
    /// ## Example
    /// ```rust
    /// use lunas_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupiah(1_000_000).format_rupiah(), "Rp 1.000.000");
    /// assert_eq!(Money::from_rupiah(500).format_rupiah(), "Rp 500");
    /// assert_eq!(Money::from_rupiah(-50_000).format_rupiah(), "-Rp 50.000");
    /// ```
    pub fn format_rupiah(&self) -> String {
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}Rp {grouped}")
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money exactly as the storefront does.
///
/// ## Note
/// The TypeScript formatter and this impl must stay in sync: receipts,
/// logs, and the UI all show the same `Rp 1.000.000` string.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_rupiah())
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
