//! # lunas-flow: Submission Layer for Lunas
//!
//! This crate drives a composed checkout through the outside world: order
//! creation, payer account resolution, and the payment redirect. All
//! pricing math lives in `lunas-core`; this crate only sequences it
//! against the gateways.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Flow Architecture                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 CheckoutFlow (Main Orchestrator)                 │  │
//! │  │                                                                  │  │
//! │  │  Owns the submission state machine                               │  │
//! │  │  Validates via lunas-core before any network call                │  │
//! │  │  Rejects overlapping attempts (Busy)                             │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │  OrderGateway  │  │ SessionGateway │  │      Navigator         │    │
//! │  │                │  │                │  │                        │    │
//! │  │ create_order   │  │ sign_in with   │  │ Opens the payment URL  │    │
//! │  │ create_inst.   │  │ provisional    │  │ in the user agent      │    │
//! │  │ payment        │  │ credentials    │  │                        │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  LOOKUP PORTS (page assembly, before submission):                      │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ ProductCatalog │  │ CouponService  │  │ InstitutionDirectory   │    │
//! │  │ by code        │  │ resolve code   │  │ OrderHistory           │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  FLOW EVENTS (to Frontend):                                            │
//! │  • state_changed      - Submission state transitions                   │
//! │  • submission_failed  - Attempt failures (with retryable flag)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`submit`] - `CheckoutFlow` state machine and both submission flows
//! - [`gateway`] - Async ports for every external collaborator
//! - [`events`] - Emitter trait for UI observation
//! - [`config`] - Flow configuration (gateway URL, redirect pacing)
//! - [`error`] - Flow error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lunas_flow::{CheckoutFlow, FlowConfig};
//!
//! // Wire the flow against the host's gateway implementations
//! let config = FlowConfig::load_or_default(None);
//! let flow = CheckoutFlow::new(config, orders, session, navigator);
//!
//! // One call takes the checkout from form to payment page
//! let receipt = flow.submit(&product, &selected, coupon.as_ref(), &payload).await?;
//! println!("Sent to {}", receipt.payment_url);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod events;
pub mod gateway;
pub mod submit;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{CheckoutSettings, FlowConfig, GatewaySettings};
pub use error::{FlowError, FlowResult};
pub use events::{CheckoutEventEmitter, NoOpEmitter};
pub use gateway::{
    CouponService, InstallmentCreated, InstitutionDirectory, Navigator, OrderCreated,
    OrderGateway, OrderHistory, PaymentRef, ProductCatalog, ProvisionedAccount, SessionGateway,
};
pub use submit::{CheckoutFlow, SubmissionReceipt, SubmissionState};
