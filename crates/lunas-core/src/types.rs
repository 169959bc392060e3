//! # Domain Types
//!
//! Core domain types used throughout Lunas.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   PriceTier     │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  code           │       │
//! │  │  code (business)│   │  start_at       │   │  value          │       │
//! │  │  price, ppn     │   │  finish_at      │   │  value_type     │       │
//! │  │  booking_fee    │   │  price          │   │  (open set)     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  OrderPayload   │   │    TaxRate      │   │ PurchaseHistory │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  items, payer   │   │  bps (u32)      │   │  order_id       │       │
//! │  │  payment_method │   │  1100 = 11%     │   │  installment    │       │
//! │  │  installment    │   └─────────────────┘   │  details        │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every catalog entity has:
//! - `id`: UUID v4 - immutable, used for backend relations
//! - Business ID: (`code` for products) - human-readable, used in checkout links

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1100 bps = 11% (PPN since April 2022)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    ///
    /// Negative percentages saturate to zero.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
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

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Price Tier
// =============================================================================

/// A time-windowed (or explicitly linked) alternate price for a product.
///
/// Tiers model launch pricing: early-bird, normal, last-call. A checkout
/// link may pin a tier by id; otherwise the first tier whose window
/// contains "now" applies.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceTier {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display label, e.g. "Early Bird".
    pub title: Option<String>,

    /// Supporting copy shown under the label.
    pub desc: Option<String>,

    /// Window opens at this instant (inclusive). Absent = no lower bound.
    #[ts(as = "Option<String>")]
    pub start_at: Option<DateTime<Utc>>,

    /// Window closes at this instant (inclusive). Absent = no upper bound.
    #[ts(as = "Option<String>")]
    pub finish_at: Option<DateTime<Utc>>,

    /// Price in whole rupiah while this tier applies.
    pub price: i64,
}

impl PriceTier {
    /// Returns the tier price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_rupiah(self.price)
    }

    /// Checks whether this tier applies at the given instant.
    ///
    /// Both bounds are inclusive; an absent bound is unconstrained.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        let started = self.start_at.map_or(true, |start| start <= now);
        let not_finished = self.finish_at.map_or(true, |finish| now <= finish);
        started && not_finished
    }
}

// =============================================================================
// Installment Pricing Row
// =============================================================================

/// Authored per-period amounts for a specific installment count.
///
/// When a row exists for the requested count, its amounts are billed
/// verbatim - the author decides the split, and the sum is allowed to
/// differ from the grand total.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstallmentPricingRow {
    /// Number of periods this row describes.
    pub count: u32,

    /// Amount of each period in whole rupiah, in billing order.
    pub amounts: Vec<i64>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for checkout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier used in checkout links (`/checkout/{code}`).
    pub code: String,

    /// Display name shown on the checkout page and receipt.
    pub name: String,

    /// Optional description for the checkout page.
    pub description: Option<String>,

    /// Base price in whole rupiah. Authoritative unless `is_custom_price`.
    pub price: i64,

    /// Strikethrough "was" price. Display only, NEVER enters computation.
    pub shadow_price: Option<i64>,

    /// PPN percentage (0-100). Zero or less means no tax line at all.
    #[serde(default)]
    pub ppn: f64,

    /// When true, the applicable price tier decides the base price.
    #[serde(default)]
    pub is_custom_price: bool,

    /// Upfront fee in whole rupiah. Positive = registration flow, where
    /// this fee (not the grand total) is what the customer pays now.
    #[serde(default)]
    pub booking_fee: i64,

    /// Selling points listed on the checkout page, in order.
    #[serde(default)]
    pub benefits: Vec<String>,

    /// Category reference. Display only.
    pub category_id: Option<String>,

    /// Cover image. Display only.
    pub image_url: Option<String>,

    /// Interview scheduling link for cohort products. Display only.
    pub interview: Option<String>,

    /// Alternate price tiers, in authoring order. Order matters: the
    /// first currently-open tier wins.
    #[serde(default)]
    pub prices: Vec<PriceTier>,

    /// Maximum installment count offered, when the product allows paying
    /// in installments without authored rows.
    pub installment: Option<u32>,

    /// Authored installment splits, keyed by count.
    #[serde(default)]
    pub installment_prices: Vec<InstallmentPricingRow>,
}

impl Product {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_rupiah(self.price)
    }

    /// Returns the strikethrough price, if any. Display only.
    #[inline]
    pub fn shadow_price(&self) -> Option<Money> {
        self.shadow_price.map(Money::from_rupiah)
    }

    /// Returns the PPN rate. Non-positive percentages collapse to zero.
    pub fn tax_rate(&self) -> TaxRate {
        if self.ppn > 0.0 {
            TaxRate::from_percentage(self.ppn)
        } else {
            TaxRate::zero()
        }
    }

    /// Returns the booking fee as a Money type (zero when absent).
    #[inline]
    pub fn booking_fee(&self) -> Money {
        Money::from_rupiah(self.booking_fee)
    }

    /// Checks whether checkout runs as a registration flow (fee up front).
    #[inline]
    pub fn has_booking_fee(&self) -> bool {
        self.booking_fee > 0
    }

    /// Checks whether this product can be paid in installments at all.
    pub fn supports_installments(&self) -> bool {
        self.installment.is_some() || !self.installment_prices.is_empty()
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// How a coupon's `value` is interpreted.
///
/// The set is open on the wire: upstream may ship kinds we do not know,
/// and a coupon we cannot interpret must be ignored, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponValueType {
    /// `value` is a percentage of the base price.
    Percentage,
    /// `value` is a flat rupiah amount.
    Fixed,
    /// Any kind we do not recognize. Fails soft.
    #[serde(other)]
    Unknown,
}

/// A coupon as resolved by the coupon service.
///
/// Validity (expiry, usage limits) is the service's concern; by the time
/// a coupon reaches the pricing pipeline only its value matters.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coupon {
    /// Code the customer typed, e.g. "KELASGRATIS".
    pub code: String,

    /// Magnitude: percent for PERCENTAGE, whole rupiah for FIXED.
    pub value: f64,

    /// How to interpret `value`.
    pub value_type: CouponValueType,
}

// =============================================================================
// Order Payload
// =============================================================================

/// Contact details of the person paying.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payer {
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Company name. Only the installment-continuation call sends this.
    pub company: Option<String>,

    /// Job title. Only the installment-continuation call sends this.
    pub position: Option<String>,
}

/// One ordered product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    /// Product being bought (UUID v4).
    pub product_id: String,

    /// How many units.
    pub quantity: i64,

    /// Existing order, when paying the next installment of it.
    pub order_id: Option<String>,

    /// Pinned price tier, when the checkout link selected one.
    pub price_id: Option<String>,
}

impl OrderItem {
    /// Creates a plain single-unit item for a product.
    pub fn for_product(product_id: impl Into<String>) -> Self {
        OrderItem {
            product_id: product_id.into(),
            quantity: 1,
            order_id: None,
            price_id: None,
        }
    }
}

/// Request to pay in installments.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstallmentRequest {
    /// Number of periods requested. This is a COUNT, not rupiah; the
    /// field name is a wire contract we cannot change.
    pub amount: u32,

    /// True when the first payment is the booking fee.
    #[serde(default)]
    pub is_booking: bool,
}

/// Everything the order-creation endpoint needs.
///
/// Built incrementally while the customer fills the checkout page, then
/// immutable once submitted. Use [`OrderPayload::builder`] to assemble
/// one; each builder call overwrites its whole field (last writer wins).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderPayload {
    /// Chosen payment method code, e.g. "bank_transfer".
    pub payment_method: Option<String>,

    /// Applied coupon, by id.
    pub coupon_id: Option<String>,

    /// Ordered products. Checkout always has at least one.
    #[serde(default)]
    pub items: Vec<OrderItem>,

    /// Who pays. Absent until the contact form is filled.
    pub payer: Option<Payer>,

    /// Installment plan request, when the customer picked one.
    pub installment: Option<InstallmentRequest>,

    /// Payer's institution, for partnered cohorts. Display only.
    pub institution_id: Option<String>,
}

impl OrderPayload {
    /// Starts building a payload.
    pub fn builder() -> PayloadBuilder {
        PayloadBuilder::new()
    }
}

// =============================================================================
// Payload Builder
// =============================================================================

/// Builder for [`OrderPayload`].
///
/// Each checkout section (contact form, payment picker, coupon box,
/// installment picker) contributes its own field. Calling a setter twice
/// replaces the earlier value - deterministic last-writer-wins, so
/// re-rendering a section never corrupts the payload.
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    payload: OrderPayload,
}

impl PayloadBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the payment method code.
    pub fn payment_method(mut self, method: impl Into<String>) -> Self {
        self.payload.payment_method = Some(method.into());
        self
    }

    /// Sets the applied coupon id.
    pub fn coupon(mut self, coupon_id: impl Into<String>) -> Self {
        self.payload.coupon_id = Some(coupon_id.into());
        self
    }

    /// Replaces the item list.
    pub fn items(mut self, items: Vec<OrderItem>) -> Self {
        self.payload.items = items;
        self
    }

    /// Appends one item.
    pub fn add_item(mut self, item: OrderItem) -> Self {
        self.payload.items.push(item);
        self
    }

    /// Sets the payer contact details.
    pub fn payer(mut self, payer: Payer) -> Self {
        self.payload.payer = Some(payer);
        self
    }

    /// Sets the installment request.
    pub fn installment(mut self, request: InstallmentRequest) -> Self {
        self.payload.installment = Some(request);
        self
    }

    /// Sets the payer's institution.
    pub fn institution(mut self, institution_id: impl Into<String>) -> Self {
        self.payload.institution_id = Some(institution_id.into());
        self
    }

    /// Finalizes the payload.
    pub fn build(self) -> OrderPayload {
        self.payload
    }
}

// =============================================================================
// Institution
// =============================================================================

/// A partnered institution (campus, company). Display only.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Institution {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Purchase History
// =============================================================================

/// Status of one installment payment.
///
/// Open set on the wire; unknown statuses are never treated as payable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    /// Awaiting payment. The only status we ever act on.
    Pending,
    /// Paid and settled.
    Success,
    /// Payment attempt failed.
    Failed,
    /// Payment window closed unpaid.
    Expired,
    /// Any status we do not recognize.
    #[serde(other)]
    Unknown,
}

/// One period of an existing installment plan.
///
/// Read-only here: history is owned by the backend, the checkout only
/// selects which period to pay next.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstallmentPaymentDetail {
    /// 1-based period number.
    pub number: u32,

    /// Payment status of this period.
    pub status: InstallmentStatus,

    /// Amount due for this period, in whole rupiah.
    pub grand_total: i64,

    /// When this period's payment window closes.
    #[ts(as = "Option<String>")]
    pub expired_date: Option<DateTime<Utc>>,
}

impl InstallmentPaymentDetail {
    /// Returns the amount due as a Money type.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_rupiah(self.grand_total)
    }

    /// Checks whether this period is still awaiting payment.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == InstallmentStatus::Pending
    }
}

/// The installment record attached to a past order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoryInstallment {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// All periods of the plan, as the backend reports them. Not
    /// guaranteed to arrive sorted by number.
    #[serde(default)]
    pub details: Vec<InstallmentPaymentDetail>,
}

/// A customer's past order for a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PurchaseHistory {
    /// The existing order's id, reused when paying later installments.
    pub order_id: String,

    /// Installment record, when the order was paid in installments.
    pub installment: Option<HistoryInstallment>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1100);
        assert_eq!(rate.bps(), 1100);
        assert!((rate.percentage() - 11.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(11.0);
        assert_eq!(rate.bps(), 1100);

        // Negative saturates to zero
        let rate = TaxRate::from_percentage(-5.0);
        assert!(rate.is_zero());
    }

    #[test]
    fn test_product_tax_rate_suppressed_when_ppn_zero() {
        let mut product = test_product();
        product.ppn = 0.0;
        assert!(product.tax_rate().is_zero());

        product.ppn = 11.0;
        assert_eq!(product.tax_rate().bps(), 1100);
    }

    #[test]
    fn test_tier_window_inclusive_on_both_ends() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let finish = Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap();
        let tier = PriceTier {
            id: "t-1".to_string(),
            title: Some("Early Bird".to_string()),
            desc: None,
            start_at: Some(start),
            finish_at: Some(finish),
            price: 750_000,
        };

        assert!(tier.is_current(start));
        assert!(tier.is_current(finish));
        assert!(tier.is_current(start + chrono::Duration::days(10)));
        assert!(!tier.is_current(start - chrono::Duration::seconds(1)));
        assert!(!tier.is_current(finish + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_tier_window_open_ends() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let open = PriceTier {
            id: "t-2".to_string(),
            title: None,
            desc: None,
            start_at: None,
            finish_at: None,
            price: 500_000,
        };
        assert!(open.is_current(now));
    }

    #[test]
    fn test_coupon_value_type_wire_format() {
        let pct: CouponValueType = serde_json::from_str("\"PERCENTAGE\"").unwrap();
        assert_eq!(pct, CouponValueType::Percentage);

        let fixed: CouponValueType = serde_json::from_str("\"FIXED\"").unwrap();
        assert_eq!(fixed, CouponValueType::Fixed);

        // Unrecognized kinds deserialize instead of erroring
        let other: CouponValueType = serde_json::from_str("\"BUY_ONE_GET_ONE\"").unwrap();
        assert_eq!(other, CouponValueType::Unknown);
    }

    #[test]
    fn test_installment_status_open_set() {
        let pending: InstallmentStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(pending, InstallmentStatus::Pending);

        let mystery: InstallmentStatus = serde_json::from_str("\"ON_HOLD\"").unwrap();
        assert_eq!(mystery, InstallmentStatus::Unknown);
    }

    #[test]
    fn test_builder_last_writer_wins() {
        let payload = OrderPayload::builder()
            .payment_method("gopay")
            .payment_method("bank_transfer")
            .add_item(OrderItem::for_product("p-1"))
            .institution("inst-1")
            .build();

        assert_eq!(payload.payment_method.as_deref(), Some("bank_transfer"));
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.institution_id.as_deref(), Some("inst-1"));
        assert!(payload.payer.is_none());
    }

    #[test]
    fn test_builder_items_replace_but_add_appends() {
        let payload = OrderPayload::builder()
            .add_item(OrderItem::for_product("p-1"))
            .items(vec![OrderItem::for_product("p-2")])
            .add_item(OrderItem::for_product("p-3"))
            .build();

        let ids: Vec<&str> = payload.items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p-2", "p-3"]);
    }

    #[test]
    fn test_supports_installments() {
        let mut product = test_product();
        assert!(!product.supports_installments());

        product.installment = Some(3);
        assert!(product.supports_installments());

        product.installment = None;
        product.installment_prices = vec![InstallmentPricingRow {
            count: 2,
            amounts: vec![600_000, 500_000],
        }];
        assert!(product.supports_installments());
    }

    /// Shared minimal product fixture.
    fn test_product() -> Product {
        Product {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            code: "RUST-101".to_string(),
            name: "Kelas Rust Dasar".to_string(),
            description: None,
            price: 1_000_000,
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
}
