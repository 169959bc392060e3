//! # Checkout Events
//!
//! Observer trait the host application implements to mirror flow state
//! into its UI (button spinners, error toasts). The flow emits, never
//! waits: emitters must not block.

use crate::submit::SubmissionState;

/// Trait for observing submission progress.
pub trait CheckoutEventEmitter: Send + Sync {
    /// The flow entered a new state.
    fn state_changed(&self, state: SubmissionState);

    /// The attempt failed. `retryable` tells the UI whether a
    /// "try again" affordance makes sense.
    fn submission_failed(&self, message: &str, retryable: bool);
}

/// No-op event emitter for headless use and tests.
pub struct NoOpEmitter;

impl CheckoutEventEmitter for NoOpEmitter {
    fn state_changed(&self, _state: SubmissionState) {}
    fn submission_failed(&self, _message: &str, _retryable: bool) {}
}
