//! # Submission Flow
//!
//! Drives a checkout attempt end to end: validate, create the order,
//! resolve the payer account, redirect to payment.
//!
//! ## Submission State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Submission State Machine                            │
//! │                                                                         │
//! │              submit()                                                   │
//! │  ┌──────┐ ───────────► ┌────────────┐ ────────► ┌────────────┐         │
//! │  │ Idle │              │ Validating │           │ Submitting │         │
//! │  └──────┘              └─────┬──────┘           └─────┬──────┘         │
//! │                              │ form invalid           │ gateway error  │
//! │                              ▼                        ▼                │
//! │                        ┌───────────────────────────────────┐           │
//! │                        │              Failed               │           │
//! │                        └───────────────────────────────────┘           │
//! │                                       ▲                                │
//! │                                       │ fatal sign-in error            │
//! │     ┌─────────────────────┐           │                                │
//! │     │AwaitingPayerAccount │ ──────────┘                                │
//! │     └──────────┬──────────┘                                            │
//! │                │ signed in, or "Invalid password" tolerated            │
//! │                ▼                                                       │
//! │     ┌─────────────────────┐                                            │
//! │     │     Redirecting     │  (pacing delay, then Navigator::open)      │
//! │     └─────────────────────┘                                            │
//! │                                                                        │
//! │  • An existing payer session skips AwaitingPayerAccount entirely.     │
//! │  • pay_next_installment() runs Validating → Submitting → Redirecting  │
//! │    only (the payer is already authenticated).                         │
//! │  • While Validating/Submitting/AwaitingPayerAccount is active, new    │
//! │    attempts are rejected with Busy.                                   │
//! │  • Nothing here retries. A Failed attempt is resubmitted by the user. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use url::Url;

use lunas_core::{
    compose, next_pending, Coupon, OrderPayload, Product, PurchaseHistory, SelectedPrice,
    ValidationError, ValidationErrors,
};

use crate::config::FlowConfig;
use crate::error::{FlowError, FlowResult};
use crate::events::{CheckoutEventEmitter, NoOpEmitter};
use crate::gateway::{Navigator, OrderGateway, SessionGateway};

/// Rejection message the identity provider returns when the e-mail is
/// already taken: the provisional password never matches an account the
/// payer created themselves. Matched verbatim.
const ACCOUNT_EXISTS_REJECTION: &str = "Invalid password";

// =============================================================================
// Submission State
// =============================================================================

/// Where a submission attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Nothing in flight.
    Idle,
    /// Running form validation and composition.
    Validating,
    /// Order creation call in flight.
    Submitting,
    /// Establishing the payer session with provisional credentials.
    AwaitingPayerAccount,
    /// Order exists, payment URL is valid, handing off to the provider.
    Redirecting,
    /// The attempt died. A fresh submit() starts over.
    Failed,
}

impl SubmissionState {
    /// True while an attempt holds the flow. Redirecting is already done
    /// (the URL left our hands), so a new attempt may start from there.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SubmissionState::Validating
                | SubmissionState::Submitting
                | SubmissionState::AwaitingPayerAccount
        )
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionState::Idle => write!(f, "idle"),
            SubmissionState::Validating => write!(f, "validating"),
            SubmissionState::Submitting => write!(f, "submitting"),
            SubmissionState::AwaitingPayerAccount => write!(f, "awaiting_payer_account"),
            SubmissionState::Redirecting => write!(f, "redirecting"),
            SubmissionState::Failed => write!(f, "failed"),
        }
    }
}

// =============================================================================
// Submission Receipt
// =============================================================================

/// What a finished attempt hands back to the caller.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SubmissionReceipt {
    /// The validated payment URL the customer was sent to.
    pub payment_url: String,

    /// Whether a fresh payer account session was established with the
    /// provisional credentials. False when a session already existed or
    /// the account predated this order.
    pub credentials_issued: bool,
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// Orchestrates checkout submissions against the gateway ports.
///
/// One instance serves the whole checkout page; it owns the state
/// machine and rejects overlapping attempts. Cloning is cheap (shared
/// internals), so handlers can hold their own copy.
#[derive(Clone)]
pub struct CheckoutFlow {
    /// Flow configuration.
    config: Arc<FlowConfig>,

    /// Order creation endpoints.
    orders: Arc<dyn OrderGateway>,

    /// Payer session management.
    session: Arc<dyn SessionGateway>,

    /// User-agent redirect port.
    navigator: Arc<dyn Navigator>,

    /// Event emitter for UI notifications.
    emitter: Arc<dyn CheckoutEventEmitter>,

    /// Current submission state.
    state: Arc<RwLock<SubmissionState>>,
}

impl CheckoutFlow {
    /// Creates a new flow with a no-op emitter.
    pub fn new(
        config: FlowConfig,
        orders: Arc<dyn OrderGateway>,
        session: Arc<dyn SessionGateway>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::with_emitter(config, orders, session, navigator, Arc::new(NoOpEmitter))
    }

    /// Creates a new flow with a custom event emitter.
    pub fn with_emitter(
        config: FlowConfig,
        orders: Arc<dyn OrderGateway>,
        session: Arc<dyn SessionGateway>,
        navigator: Arc<dyn Navigator>,
        emitter: Arc<dyn CheckoutEventEmitter>,
    ) -> Self {
        CheckoutFlow {
            config: Arc::new(config),
            orders,
            session,
            navigator,
            emitter,
            state: Arc::new(RwLock::new(SubmissionState::Idle)),
        }
    }

    /// Returns the current submission state.
    pub async fn state(&self) -> SubmissionState {
        *self.state.read().await
    }

    /// Submits the checkout: validates, creates the order, resolves the
    /// payer account, redirects to payment.
    ///
    /// ## Account Resolution
    /// Order creation provisions an account for first-time payers. When no
    /// session exists, the flow signs in with those provisional
    /// credentials. A rejection of exactly `"Invalid password"` means the
    /// account predated this order; payment does not need the fresh
    /// session, so the flow logs it and moves on. Any other rejection
    /// kills the attempt.
    pub async fn submit(
        &self,
        product: &Product,
        selected: &SelectedPrice,
        coupon: Option<&Coupon>,
        payload: &OrderPayload,
    ) -> FlowResult<SubmissionReceipt> {
        self.begin_attempt().await?;

        match self.run_submit(product, selected, coupon, payload).await {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    async fn run_submit(
        &self,
        product: &Product,
        selected: &SelectedPrice,
        coupon: Option<&Coupon>,
        payload: &OrderPayload,
    ) -> FlowResult<SubmissionReceipt> {
        // Validating: composition runs afresh from the full input tuple.
        // A failure here never touches the network.
        let summary = compose(product, selected, coupon, payload)?;
        debug!(
            amount_due = %summary.amount_due,
            due_kind = ?summary.due_kind,
            "Checkout validated"
        );

        self.set_state(SubmissionState::Submitting).await;
        let created = self.orders.create_order(payload).await?;

        // Parse while the attempt is still submitting, so a bad URL fails
        // the attempt before any account work happens.
        let payment_url = Url::parse(&created.payment.url)?;

        let credentials_issued = if self.session.is_signed_in().await {
            debug!("Payer session already present, skipping account resolution");
            false
        } else {
            self.set_state(SubmissionState::AwaitingPayerAccount).await;
            self.resolve_payer_account(&created.user.email, &created.user.password)
                .await?
        };

        self.redirect(&payment_url).await;

        Ok(SubmissionReceipt {
            payment_url: payment_url.into(),
            credentials_issued,
        })
    }

    /// Pays the next pending installment of an existing order.
    ///
    /// Runs Validating → Submitting → Redirecting: the payer already has
    /// a session, so there is no account resolution. The next installment
    /// is the lowest-numbered PENDING detail regardless of how the
    /// history lists them.
    pub async fn pay_next_installment(
        &self,
        history: &PurchaseHistory,
        payload: &OrderPayload,
    ) -> FlowResult<SubmissionReceipt> {
        self.begin_attempt().await?;

        match self.run_pay_next_installment(history, payload).await {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                self.fail(&e).await;
                Err(e)
            }
        }
    }

    async fn run_pay_next_installment(
        &self,
        history: &PurchaseHistory,
        payload: &OrderPayload,
    ) -> FlowResult<SubmissionReceipt> {
        // Validating: installment payments must reference the order.
        let mut errors = ValidationErrors::new();
        if payload.items.is_empty() || payload.items.iter().any(|item| item.order_id.is_none()) {
            errors.push(ValidationError::Required {
                field: "order_id".to_string(),
            });
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let details = history
            .installment
            .as_ref()
            .map(|plan| plan.details.as_slice())
            .unwrap_or(&[]);

        let next = next_pending(details).ok_or_else(|| FlowError::NothingToPay {
            order_id: history.order_id.clone(),
        })?;

        info!(
            order_id = %history.order_id,
            number = next.number,
            amount = %next.grand_total(),
            "Paying next installment"
        );

        self.set_state(SubmissionState::Submitting).await;
        let created = self.orders.create_installment_payment(payload).await?;
        let payment_url = Url::parse(&created.payment.url)?;

        self.redirect(&payment_url).await;

        Ok(SubmissionReceipt {
            payment_url: payment_url.into(),
            credentials_issued: false,
        })
    }

    // =========================================================================
    // Steps
    // =========================================================================

    /// Signs in with the provisional credentials. Returns whether a fresh
    /// session was actually established.
    async fn resolve_payer_account(&self, email: &str, password: &str) -> FlowResult<bool> {
        match self.session.sign_in(email, password).await {
            Ok(()) => {
                debug!("Payer session established with provisional credentials");
                Ok(true)
            }
            Err(FlowError::SignInFailed(message)) if message == ACCOUNT_EXISTS_REJECTION => {
                warn!("Payer account already exists, continuing without a fresh session");
                Ok(false)
            }
            Err(FlowError::SignInFailed(message)) => Err(FlowError::FatalAuth(message)),
            Err(other) => Err(other),
        }
    }

    /// Terminal success: pacing pause, then the URL leaves our hands.
    async fn redirect(&self, payment_url: &Url) {
        self.set_state(SubmissionState::Redirecting).await;
        tokio::time::sleep(self.config.redirect_delay()).await;
        self.navigator.open(payment_url.as_str());
        info!(url = %payment_url, "Handed off to payment page");
    }

    // =========================================================================
    // State Handling
    // =========================================================================

    /// Claims the flow for a new attempt. The check and the flip happen
    /// under one write lock so two concurrent callers cannot both pass.
    async fn begin_attempt(&self) -> FlowResult<()> {
        {
            let mut state = self.state.write().await;
            if state.is_in_flight() {
                debug!(state = %state, "Rejecting overlapping submission");
                return Err(FlowError::Busy);
            }
            *state = SubmissionState::Validating;
        }
        self.emitter.state_changed(SubmissionState::Validating);
        Ok(())
    }

    async fn set_state(&self, next: SubmissionState) {
        {
            let mut state = self.state.write().await;
            debug!(from = %state, to = %next, "Submission state change");
            *state = next;
        }
        self.emitter.state_changed(next);
    }

    async fn fail(&self, err: &FlowError) {
        error!(error = %err, retryable = err.is_retryable(), "Submission attempt failed");
        self.set_state(SubmissionState::Failed).await;
        self.emitter
            .submission_failed(&err.to_string(), err.is_retryable());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
