//! # Checkout Summary Module
//!
//! Assembles everything the customer is about to pay into one summary:
//! validation first, then the pricing pipeline, then the installment
//! schedule, then the single "pay now" amount.
//!
//! ## Composition Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        compose()                                        │
//! │                                                                         │
//! │  OrderPayload ──► validate_payload ──► ValidationErrors? ── STOP       │
//! │                                        (nothing leaves the device)     │
//! │       │ ok                                                              │
//! │       ▼                                                                 │
//! │  base price   = tier price if is_custom_price, else product price      │
//! │  subtotal     = base − coupon discount                                 │
//! │  grand total  = subtotal + PPN (only when ppn > 0)                     │
//! │  schedule     = installments (only when requested AND supported)       │
//! │                                                                         │
//! │  amount due now:                                                       │
//! │    booking fee > 0 ──► the fee (registration flow)                     │
//! │    else schedule   ──► first installment                               │
//! │    else            ──► grand total                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `compose` is pure and idempotent: the checkout page calls it afresh on
//! every input change rather than patching a previous result.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationErrors;
use crate::installment::{build_schedule, InstallmentSchedule};
use crate::money::Money;
use crate::pricing::{apply_discount, CouponOutcome, SelectedPrice};
use crate::types::{Coupon, OrderPayload, Product, TaxRate};
use crate::validation::validate_payload;

// =============================================================================
// Due Kind
// =============================================================================

/// Which amount the customer actually pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DueKind {
    /// Registration flow: the booking fee is due, the grand total is
    /// informational.
    BookingFee,
    /// Installment plan: the first period is due.
    FirstInstallment,
    /// Plain checkout: the whole grand total is due.
    FullPayment,
}

// =============================================================================
// Checkout Summary
// =============================================================================

/// The complete priced view of one checkout.
///
/// Every amount the storefront renders comes from here; it never does
/// its own arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutSummary {
    /// The price charging starts from.
    pub base_price: Money,

    /// Label of the tier that set the base price, when one did.
    pub price_title: Option<String>,

    /// Supporting copy of that tier.
    pub price_desc: Option<String>,

    /// Amount the coupon took off. Zero unless applied.
    pub discount: Money,

    /// What happened to the coupon.
    pub coupon: CouponOutcome,

    /// Base price minus discount.
    pub subtotal: Money,

    /// The PPN rate applied. Zero means no tax line.
    pub tax_rate: TaxRate,

    /// PPN amount on the subtotal.
    pub tax: Money,

    /// Subtotal plus tax. What the order is worth.
    pub grand_total: Money,

    /// Payment schedule, when the customer pays in installments.
    pub schedule: Option<InstallmentSchedule>,

    /// The product's booking fee (zero when absent).
    pub booking_fee: Money,

    /// What the customer pays right now.
    pub amount_due: Money,

    /// Which rule picked `amount_due`.
    pub due_kind: DueKind,
}

// =============================================================================
// Composition
// =============================================================================

/// Validates the payload and composes the checkout summary.
///
/// ## Base Price Rule
/// `is_custom_price` products charge the selected tier's price; everyone
/// else charges the product's own price no matter which tier is current.
/// The tier's label still shows either way.
///
/// ## Failure
/// Validation failures come back as the full field-keyed collection and
/// MUST keep the order on the device: callers only talk to the network
/// after this returns `Ok`.
pub fn compose(
    product: &Product,
    selected: &SelectedPrice,
    coupon: Option<&Coupon>,
    payload: &OrderPayload,
) -> Result<CheckoutSummary, ValidationErrors> {
    validate_payload(payload)?;

    let base_price = if product.is_custom_price {
        selected.price
    } else {
        product.price()
    };

    let discounted = apply_discount(base_price, coupon);

    let tax_rate = product.tax_rate();
    let tax = if tax_rate.is_zero() {
        Money::zero()
    } else {
        discounted.subtotal.calculate_tax(tax_rate)
    };
    let grand_total = discounted.subtotal + tax;

    let schedule = if product.supports_installments() {
        payload
            .installment
            .as_ref()
            .and_then(|request| build_schedule(grand_total, request.amount, &product.installment_prices))
    } else {
        None
    };

    let (amount_due, due_kind) = if product.has_booking_fee() {
        (product.booking_fee(), DueKind::BookingFee)
    } else if let Some(first) = schedule.as_ref().and_then(InstallmentSchedule::first) {
        (first, DueKind::FirstInstallment)
    } else {
        (grand_total, DueKind::FullPayment)
    };

    Ok(CheckoutSummary {
        base_price,
        price_title: selected.title.clone(),
        price_desc: selected.desc.clone(),
        discount: discounted.discount,
        coupon: discounted.coupon,
        subtotal: discounted.subtotal,
        tax_rate,
        tax,
        grand_total,
        schedule,
        booking_fee: product.booking_fee(),
        amount_due,
        due_kind,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
