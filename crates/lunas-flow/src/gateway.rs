//! # Gateway Ports
//!
//! Async traits for every collaborator the flow talks to. Implementations
//! live with the host application (HTTP clients, SDK wrappers); tests use
//! in-memory fakes.
//!
//! ## Port Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CheckoutFlow Collaborators                         │
//! │                                                                         │
//! │                         ┌──────────────┐                                │
//! │   ProductCatalog ──────►│              │◄────── CouponService           │
//! │   (load product)        │ CheckoutFlow │        (resolve code)          │
//! │                         │              │                                │
//! │   InstitutionDirectory─►│              │◄────── OrderHistory            │
//! │   (display only)        └──────┬───────┘        (installment status)    │
//! │                                │                                        │
//! │              ┌─────────────────┼──────────────────┐                     │
//! │              ▼                 ▼                  ▼                     │
//! │      ┌──────────────┐  ┌──────────────┐  ┌──────────────┐              │
//! │      │ OrderGateway │  │SessionGateway│  │  Navigator   │              │
//! │      │ create_order │  │ sign_in      │  │ open(url)    │              │
//! │      │ create_inst. │  │ is_signed_in │  │ (sync port)  │              │
//! │      └──────────────┘  └──────────────┘  └──────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use lunas_core::{Coupon, Institution, OrderPayload, Product, PurchaseHistory};

use crate::error::FlowResult;

// =============================================================================
// Response DTOs
// =============================================================================

/// Account the order-creation endpoint provisions for a first-time payer.
///
/// The password is a provider-generated provisional value; the flow uses
/// it once to establish a session and never stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionedAccount {
    pub email: String,
    pub password: String,
}

/// Reference to a payment the provider is waiting on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRef {
    /// Where the customer completes payment. Validated before redirect.
    pub url: String,
}

/// Response of a successful order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreated {
    /// Credentials for the (possibly pre-existing) payer account.
    pub user: ProvisionedAccount,

    /// The payment awaiting the customer.
    pub payment: PaymentRef,
}

/// Response of a successful installment-payment creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentCreated {
    /// The payment awaiting the customer.
    pub payment: PaymentRef,
}

// =============================================================================
// Catalog & Lookup Ports
// =============================================================================

/// Product lookup by storefront code.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Loads the product for a checkout page. `NotFound` sends the caller
    /// back to the catalog.
    async fn product_by_code(&self, code: &str) -> FlowResult<Product>;
}

/// Coupon resolution.
///
/// Whether a code is expired or exhausted is the service's concern; the
/// flow only consumes the resolved value.
#[async_trait]
pub trait CouponService: Send + Sync {
    async fn resolve(&self, code: &str) -> FlowResult<Coupon>;
}

/// Institution lookup (invoicing display only).
#[async_trait]
pub trait InstitutionDirectory: Send + Sync {
    async fn institution_by_id(&self, id: &str) -> FlowResult<Institution>;
}

/// Purchase history, used to find the next payable installment.
#[async_trait]
pub trait OrderHistory: Send + Sync {
    async fn history_by_product(&self, user_id: &str, product_id: &str)
        -> FlowResult<PurchaseHistory>;
}

// =============================================================================
// Order & Session Ports
// =============================================================================

/// The order-creation endpoints.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Creates the order and provisions a payer account when none exists.
    async fn create_order(&self, payload: &OrderPayload) -> FlowResult<OrderCreated>;

    /// Creates a payment for one installment of an existing order. The
    /// payload's item carries the `order_id`.
    async fn create_installment_payment(
        &self,
        payload: &OrderPayload,
    ) -> FlowResult<InstallmentCreated>;
}

/// Payer session management.
///
/// Implementations report a rejected sign-in as `FlowError::SignInFailed`
/// carrying the provider's message verbatim; the flow inspects that
/// message to decide whether the rejection is tolerable.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Whether a payer session already exists.
    async fn is_signed_in(&self) -> bool;

    /// Establishes a session with the given credentials.
    async fn sign_in(&self, email: &str, password: &str) -> FlowResult<()>;
}

// =============================================================================
// Navigator Port
// =============================================================================

/// Hands the payment URL to the user agent. Synchronous on purpose: the
/// flow is done once the URL leaves its hands.
pub trait Navigator: Send + Sync {
    fn open(&self, url: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_created_wire_shape() {
        let json = r#"{
            "user": { "email": "andi@example.com", "password": "sandi-sementara" },
            "payment": { "url": "https://pay.example.com/inv/123" }
        }"#;

        let created: OrderCreated = serde_json::from_str(json).unwrap();
        assert_eq!(created.user.email, "andi@example.com");
        assert_eq!(created.payment.url, "https://pay.example.com/inv/123");
    }

    #[test]
    fn test_installment_created_wire_shape() {
        let json = r#"{ "payment": { "url": "https://pay.example.com/inv/124" } }"#;
        let created: InstallmentCreated = serde_json::from_str(json).unwrap();
        assert_eq!(created.payment.url, "https://pay.example.com/inv/124");
    }
}
