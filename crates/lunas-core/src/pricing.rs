//! # Pricing Module
//!
//! The pricing pipeline: which price applies, what a coupon takes off,
//! what PPN adds.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricing Pipeline                                 │
//! │                                                                         │
//! │  Product + optional tier id + now                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  select_price ──► base price (tier price or product price)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_discount ──► subtotal + discount + coupon outcome               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_tax ──► grand total (discount BEFORE tax, always)               │
//! │                                                                         │
//! │  Every step is a pure function: same inputs, same rupiah, no clock     │
//! │  reads, no caching. The UI recomputes the whole pipeline on change.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A coupon the pipeline cannot honor (zero value, unknown kind) is
//! IGNORED, never an error: checkout proceeds at full price and the
//! outcome says why.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Coupon, CouponValueType, PriceTier, Product, TaxRate};

// =============================================================================
// Selected Price
// =============================================================================

/// The price the checkout will charge, with its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectedPrice {
    /// The tier this price came from, when it came from one.
    pub tier_id: Option<String>,

    /// Tier label, e.g. "Early Bird".
    pub title: Option<String>,

    /// Tier supporting copy.
    pub desc: Option<String>,

    /// The amount itself.
    pub price: Money,
}

impl SelectedPrice {
    /// A selection backed by a concrete tier.
    fn from_tier(tier: &PriceTier) -> Self {
        SelectedPrice {
            tier_id: Some(tier.id.clone()),
            title: tier.title.clone(),
            desc: tier.desc.clone(),
            price: tier.price(),
        }
    }

    /// The synthetic selection: the product's own price, no label.
    fn base(product: &Product) -> Self {
        SelectedPrice {
            tier_id: None,
            title: None,
            desc: None,
            price: product.price(),
        }
    }
}

/// Selects the applicable price for a product.
///
/// ## Selection Order
/// 1. An explicit `tier_id` (checkout link pinned an offer) returns that
///    tier verbatim - even outside its date window. Unknown ids error.
/// 2. Otherwise the FIRST tier in authoring order whose `[start_at,
///    finish_at]` window contains `now` wins. Both bounds inclusive;
///    an absent bound is unconstrained.
/// 3. Otherwise the product's own price, with no tier metadata.
///
/// Pure function of `(product, tier_id, now)` - callers pass the clock.
pub fn select_price(
    product: &Product,
    tier_id: Option<&str>,
    now: DateTime<Utc>,
) -> CoreResult<SelectedPrice> {
    if let Some(id) = tier_id {
        return product
            .prices
            .iter()
            .find(|tier| tier.id == id)
            .map(SelectedPrice::from_tier)
            .ok_or_else(|| CoreError::PriceTierNotFound(id.to_string()));
    }

    if let Some(tier) = product.prices.iter().find(|tier| tier.is_current(now)) {
        return Ok(SelectedPrice::from_tier(tier));
    }

    Ok(SelectedPrice::base(product))
}

// =============================================================================
// Coupon Outcome
// =============================================================================

/// Why a coupon was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponIgnoredReason {
    /// Value is exactly zero: nothing to take off.
    ZeroValue,
    /// Value is negative: a discount must never raise the price.
    NegativeValue,
    /// `value_type` is something we do not recognize.
    UnknownKind,
}

impl fmt::Display for CouponIgnoredReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            CouponIgnoredReason::ZeroValue => "coupon value is zero",
            CouponIgnoredReason::NegativeValue => "coupon value is negative",
            CouponIgnoredReason::UnknownKind => "unrecognized coupon kind",
        };
        write!(f, "{reason}")
    }
}

/// What happened to the coupon during discounting.
///
/// Ignored is a soft signal: the storefront shows "coupon not applied"
/// next to an unchanged subtotal, and checkout continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponOutcome {
    /// No coupon was given.
    Absent,
    /// The coupon reduced the subtotal.
    Applied { code: String },
    /// The coupon could not be honored and changed nothing.
    Ignored {
        code: String,
        reason: CouponIgnoredReason,
    },
}

impl CouponOutcome {
    /// True when a discount was actually taken off.
    pub fn is_applied(&self) -> bool {
        matches!(self, CouponOutcome::Applied { .. })
    }

    /// True when a coupon was given but could not be honored.
    pub fn is_ignored(&self) -> bool {
        matches!(self, CouponOutcome::Ignored { .. })
    }
}

// =============================================================================
// Discount
// =============================================================================

/// Result of applying (or failing to apply) a coupon to a base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountBreakdown {
    /// Base price minus discount. Never negative.
    pub subtotal: Money,

    /// The amount taken off. Zero when no coupon applied.
    pub discount: Money,

    /// What happened to the coupon.
    pub coupon: CouponOutcome,
}

/// Applies a coupon to a base price. Always pre-tax.
///
/// ## Rules
/// - No coupon: subtotal = base, discount = 0.
/// - PERCENTAGE: discount = base × value / 100, rounded to the nearest
///   rupiah. Values above 100% clamp at the base price.
/// - FIXED: discount = min(value, base) - a voucher larger than the
///   price zeroes the subtotal, it never goes negative.
/// - Zero, negative, or unrecognized coupons are ignored with a reason.
///
/// ## Example
/// ```rust
/// use lunas_core::money::Money;
/// use lunas_core::pricing::apply_discount;
/// use lunas_core::types::{Coupon, CouponValueType};
///
/// let coupon = Coupon {
///     code: "HEMAT10".to_string(),
///     value: 10.0,
///     value_type: CouponValueType::Percentage,
/// };
/// let result = apply_discount(Money::from_rupiah(1_000_000), Some(&coupon));
/// assert_eq!(result.discount.rupiah(), 100_000);
/// assert_eq!(result.subtotal.rupiah(), 900_000);
/// ```
pub fn apply_discount(base: Money, coupon: Option<&Coupon>) -> DiscountBreakdown {
    let Some(coupon) = coupon else {
        return DiscountBreakdown {
            subtotal: base,
            discount: Money::zero(),
            coupon: CouponOutcome::Absent,
        };
    };

    let ignored = |reason: CouponIgnoredReason| DiscountBreakdown {
        subtotal: base,
        discount: Money::zero(),
        coupon: CouponOutcome::Ignored {
            code: coupon.code.clone(),
            reason,
        },
    };

    if coupon.value == 0.0 {
        return ignored(CouponIgnoredReason::ZeroValue);
    }
    if coupon.value < 0.0 {
        return ignored(CouponIgnoredReason::NegativeValue);
    }

    let discount = match coupon.value_type {
        CouponValueType::Percentage => {
            // Wire values may be fractional ("12.5"); basis points keep
            // the math integer and exact to two decimal places.
            let bps = (coupon.value * 100.0).round() as u32;
            base.percentage(bps).min(base)
        }
        CouponValueType::Fixed => Money::from_rupiah(coupon.value.round() as i64).min(base),
        CouponValueType::Unknown => return ignored(CouponIgnoredReason::UnknownKind),
    };

    DiscountBreakdown {
        subtotal: base - discount,
        discount,
        coupon: CouponOutcome::Applied {
            code: coupon.code.clone(),
        },
    }
}

// =============================================================================
// Tax
// =============================================================================

/// Adds PPN to a subtotal and returns the grand total.
///
/// A zero rate (product with `ppn` ≤ 0) returns the subtotal unchanged -
/// no phantom tax line. Discount-before-tax is a firm invariant: the
/// subtotal passed here must already have the discount taken off.
///
/// ## Example
/// ```rust
/// use lunas_core::money::Money;
/// use lunas_core::pricing::apply_tax;
/// use lunas_core::types::TaxRate;
///
/// let grand = apply_tax(Money::from_rupiah(900_000), TaxRate::from_percentage(11.0));
/// assert_eq!(grand.rupiah(), 999_000);
/// ```
pub fn apply_tax(subtotal: Money, rate: TaxRate) -> Money {
    if rate.is_zero() {
        return subtotal;
    }
    subtotal + subtotal.calculate_tax(rate)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_product(price: i64) -> Product {
        Product {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            code: "RUST-101".to_string(),
            name: "Kelas Rust Dasar".to_string(),
            description: None,
            price,
            shadow_price: None,
            ppn: 0.0,
            is_custom_price: false,
            booking_fee: 0,
            benefits: vec![],
            category_id: None,
            image_url: None,
            interview: None,
            prices: vec![],
            installment: None,
            installment_prices: vec![],
        }
    }

    fn tier(id: &str, title: &str, start: Option<(u32, u32)>, finish: Option<(u32, u32)>, price: i64) -> PriceTier {
        let at = |(month, day): (u32, u32)| Utc.with_ymd_and_hms(2026, month, day, 0, 0, 0).unwrap();
        PriceTier {
            id: id.to_string(),
            title: Some(title.to_string()),
            desc: None,
            start_at: start.map(at),
            finish_at: finish.map(at),
            price,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_select_explicit_tier_even_outside_window() {
        let mut product = test_product(1_000_000);
        product.prices = vec![tier("t-early", "Early Bird", Some((1, 1)), Some((1, 31)), 750_000)];

        // June, far past the January window - pinned links still honor it
        let selected = select_price(&product, Some("t-early"), now()).unwrap();
        assert_eq!(selected.tier_id.as_deref(), Some("t-early"));
        assert_eq!(selected.price.rupiah(), 750_000);
        assert_eq!(selected.title.as_deref(), Some("Early Bird"));
    }

    #[test]
    fn test_select_explicit_tier_unknown_id_errors() {
        let product = test_product(1_000_000);
        let err = select_price(&product, Some("t-missing"), now()).unwrap_err();
        assert!(matches!(err, CoreError::PriceTierNotFound(ref id) if id == "t-missing"));
    }

    #[test]
    fn test_select_first_current_tier_wins() {
        let mut product = test_product(1_000_000);
        // Both windows contain June 15th; authoring order decides
        product.prices = vec![
            tier("t-a", "Promo A", Some((6, 1)), Some((6, 30)), 800_000),
            tier("t-b", "Promo B", Some((6, 10)), Some((6, 20)), 700_000),
        ];

        let selected = select_price(&product, None, now()).unwrap();
        assert_eq!(selected.tier_id.as_deref(), Some("t-a"));
        assert_eq!(selected.price.rupiah(), 800_000);
    }

    #[test]
    fn test_select_skips_closed_tiers() {
        let mut product = test_product(1_000_000);
        product.prices = vec![
            tier("t-past", "Early Bird", Some((1, 1)), Some((1, 31)), 700_000),
            tier("t-open", "Normal", Some((6, 1)), None, 900_000),
        ];

        let selected = select_price(&product, None, now()).unwrap();
        assert_eq!(selected.tier_id.as_deref(), Some("t-open"));
        assert_eq!(selected.price.rupiah(), 900_000);
    }

    #[test]
    fn test_select_falls_back_to_product_price() {
        let mut product = test_product(1_250_000);
        product.prices = vec![tier("t-past", "Early Bird", Some((1, 1)), Some((1, 31)), 700_000)];

        let selected = select_price(&product, None, now()).unwrap();
        assert_eq!(selected.tier_id, None);
        assert_eq!(selected.title, None);
        assert_eq!(selected.desc, None);
        assert_eq!(selected.price.rupiah(), 1_250_000);
    }

    #[test]
    fn test_select_is_pure() {
        let mut product = test_product(1_000_000);
        product.prices = vec![tier("t-a", "Promo", Some((6, 1)), Some((6, 30)), 800_000)];

        let first = select_price(&product, None, now()).unwrap();
        let second = select_price(&product, None, now()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_discount_without_coupon() {
        let result = apply_discount(Money::from_rupiah(1_000_000), None);
        assert_eq!(result.subtotal.rupiah(), 1_000_000);
        assert_eq!(result.discount.rupiah(), 0);
        assert_eq!(result.coupon, CouponOutcome::Absent);
    }

    #[test]
    fn test_percentage_discount_exact() {
        let coupon = Coupon {
            code: "HEMAT10".to_string(),
            value: 10.0,
            value_type: CouponValueType::Percentage,
        };
        let result = apply_discount(Money::from_rupiah(1_000_000), Some(&coupon));
        assert_eq!(result.discount.rupiah(), 100_000);
        assert_eq!(result.subtotal.rupiah(), 900_000);
        assert!(result.coupon.is_applied());
    }

    #[test]
    fn test_percentage_discount_fractional_value() {
        let coupon = Coupon {
            code: "HEMAT12.5".to_string(),
            value: 12.5,
            value_type: CouponValueType::Percentage,
        };
        let result = apply_discount(Money::from_rupiah(200_000), Some(&coupon));
        assert_eq!(result.discount.rupiah(), 25_000);
        assert_eq!(result.subtotal.rupiah(), 175_000);
    }

    #[test]
    fn test_fixed_discount_clamps_at_base() {
        let coupon = Coupon {
            code: "POTONG750".to_string(),
            value: 750_000.0,
            value_type: CouponValueType::Fixed,
        };
        let result = apply_discount(Money::from_rupiah(500_000), Some(&coupon));
        assert_eq!(result.discount.rupiah(), 500_000);
        assert_eq!(result.subtotal.rupiah(), 0);
        assert!(result.coupon.is_applied());
    }

    #[test]
    fn test_fixed_discount_below_base() {
        let coupon = Coupon {
            code: "POTONG100".to_string(),
            value: 100_000.0,
            value_type: CouponValueType::Fixed,
        };
        let result = apply_discount(Money::from_rupiah(500_000), Some(&coupon));
        assert_eq!(result.discount.rupiah(), 100_000);
        assert_eq!(result.subtotal.rupiah(), 400_000);
    }

    #[test]
    fn test_zero_value_coupon_ignored() {
        let coupon = Coupon {
            code: "NOL".to_string(),
            value: 0.0,
            value_type: CouponValueType::Percentage,
        };
        let result = apply_discount(Money::from_rupiah(500_000), Some(&coupon));
        assert_eq!(result.subtotal.rupiah(), 500_000);
        assert_eq!(result.discount.rupiah(), 0);
        assert_eq!(
            result.coupon,
            CouponOutcome::Ignored {
                code: "NOL".to_string(),
                reason: CouponIgnoredReason::ZeroValue,
            }
        );
    }

    #[test]
    fn test_negative_value_coupon_ignored() {
        let coupon = Coupon {
            code: "MINUS".to_string(),
            value: -10.0,
            value_type: CouponValueType::Fixed,
        };
        let result = apply_discount(Money::from_rupiah(500_000), Some(&coupon));
        assert_eq!(result.subtotal.rupiah(), 500_000);
        assert!(matches!(
            result.coupon,
            CouponOutcome::Ignored {
                reason: CouponIgnoredReason::NegativeValue,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_kind_coupon_ignored() {
        let coupon = Coupon {
            code: "MISTERI".to_string(),
            value: 50.0,
            value_type: CouponValueType::Unknown,
        };
        let result = apply_discount(Money::from_rupiah(500_000), Some(&coupon));
        assert_eq!(result.subtotal.rupiah(), 500_000);
        assert_eq!(result.discount.rupiah(), 0);
        assert!(matches!(
            result.coupon,
            CouponOutcome::Ignored {
                reason: CouponIgnoredReason::UnknownKind,
                ..
            }
        ));
    }

    #[test]
    fn test_apply_tax_zero_rate_unchanged() {
        let subtotal = Money::from_rupiah(1_000_000);
        assert_eq!(apply_tax(subtotal, TaxRate::zero()), subtotal);
    }

    #[test]
    fn test_apply_tax_ppn_11() {
        let grand = apply_tax(Money::from_rupiah(1_000_000), TaxRate::from_percentage(11.0));
        assert_eq!(grand.rupiah(), 1_110_000);
    }

    #[test]
    fn test_tax_applies_to_discounted_subtotal() {
        // Discount first, then PPN on what remains
        let coupon = Coupon {
            code: "HEMAT10".to_string(),
            value: 10.0,
            value_type: CouponValueType::Percentage,
        };
        let d = apply_discount(Money::from_rupiah(1_000_000), Some(&coupon));
        let grand = apply_tax(d.subtotal, TaxRate::from_percentage(11.0));
        assert_eq!(grand.rupiah(), 999_000);
    }
}
