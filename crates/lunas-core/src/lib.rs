//! # lunas-core: Pure Checkout Logic for Lunas
//!
//! This crate is the **heart** of Lunas checkout. It contains all pricing
//! and order-composition logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Lunas Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront (Web UI)                          │   │
//! │  │    Catalog ──► Checkout Form ──► Summary ──► Pay Button        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lunas-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │  summary  │  │   │
//! │  │   │  Product  │  │   Money   │  │   tiers   │  │  compose  │  │   │
//! │  │   │  Coupon   │  │  TaxCalc  │  │  coupons  │  │  amounts  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │installment│  │ validation│  │  display  │                 │   │
//! │  │   │ schedules │  │   rules   │  │ id-ID fmt │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK READS • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 lunas-flow (Submission Layer)                   │   │
//! │  │        gateways, sign-in, payment redirect, async state         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Coupon, OrderPayload, etc.)
//! - [`money`] - Money type in whole rupiah (no floating point!)
//! - [`pricing`] - Tier selection, coupon discounts, PPN
//! - [`installment`] - Payment schedules
//! - [`summary`] - Order composition
//! - [`validation`] - Checkout form rules
//! - [`display`] - Indonesian-locale formatting
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, even the clock is FORBIDDEN here
//!    (callers pass `now` in)
//! 3. **Integer Money**: All monetary values are whole rupiah (i64); IDR has
//!    no minor unit in practice
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use lunas_core::money::Money;
//! use lunas_core::types::TaxRate;
//!
//! // Create money in whole rupiah (never from floats!)
//! let price = Money::from_rupiah(1_000_000); // Rp 1.000.000
//!
//! // Calculate PPN
//! let ppn = TaxRate::from_percentage(11.0);
//! let tax = price.calculate_tax(ppn);
//!
//! // PPN on Rp 1.000.000 at 11% = Rp 110.000
//! assert_eq!(tax.rupiah(), 110_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod display;
pub mod error;
pub mod installment;
pub mod money;
pub mod pricing;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use lunas_core::Money` instead of
// `use lunas_core::money::Money`

pub use error::{CoreError, ValidationError, ValidationErrors};
pub use installment::{build_schedule, next_pending, InstallmentSchedule};
pub use money::Money;
pub use pricing::{apply_discount, apply_tax, select_price, CouponOutcome, SelectedPrice};
pub use summary::{compose, CheckoutSummary, DueKind};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum digits for a payer phone number
///
/// ## Business Reason
/// Indonesian local numbers run 10 to 13 digits. Payment providers reject
/// anything shorter at order time, so we reject it at the form instead.
pub const MIN_PHONE_LEN: usize = 10;
