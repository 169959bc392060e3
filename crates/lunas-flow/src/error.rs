//! # Flow Error Types
//!
//! Error types for the submission flow.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Flow Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Validation    │  │     Lookup      │  │      Gateway            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Validation     │  │  NotFound       │  │  Gateway (retryable)    │ │
//! │  │  (field-keyed)  │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Payer Account  │  │    Redirect     │  │     Flow Control        │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  SignInFailed   │  │ InvalidPayment  │  │  Busy                   │ │
//! │  │  FatalAuth      │  │ Url             │  │  NothingToPay           │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Configuration: InvalidConfig, ConfigLoadFailed, ConfigSave...  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use lunas_core::ValidationErrors;

/// Result type alias for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Flow error type covering everything a submission attempt can hit.
///
/// ## Design Principles
/// - Each variant includes enough context for debugging
/// - Errors are categorized for different handling strategies
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum FlowError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// The checkout form failed validation. Field-keyed so the storefront
    /// can highlight each offending input. Nothing was sent anywhere.
    #[error("Checkout rejected: {0}")]
    Validation(#[from] ValidationErrors),

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    /// A referenced resource does not exist.
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    // =========================================================================
    // Gateway Errors
    // =========================================================================
    /// A gateway call failed (network, 5xx, malformed response). The
    /// attempt surfaces this once; resubmission is the user's call.
    #[error("Gateway error: {0}")]
    Gateway(String),

    // =========================================================================
    // Payer Account Errors
    // =========================================================================
    /// Sign-in with the provisional credentials was rejected. Raw gateway
    /// result; the flow decides whether it is tolerable.
    #[error("Sign-in failed: {0}")]
    SignInFailed(String),

    /// Sign-in rejection the flow cannot paper over. The attempt is dead.
    #[error("Account error: {0}")]
    FatalAuth(String),

    // =========================================================================
    // Redirect Errors
    // =========================================================================
    /// The payment URL the gateway handed back does not parse.
    #[error("Invalid payment URL: {0}")]
    InvalidPaymentUrl(String),

    // =========================================================================
    // Flow Control
    // =========================================================================
    /// A submission attempt is already in flight.
    #[error("A submission is already in progress")]
    Busy,

    /// Every installment on the order is already settled (or none exist).
    #[error("Order {order_id} has no pending installment")]
    NothingToPay { order_id: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid flow configuration.
    #[error("Invalid flow configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for FlowError {
    fn from(err: url::ParseError) -> Self {
        FlowError::InvalidPaymentUrl(err.to_string())
    }
}

// Port implementations bubble response-decoding failures up as gateway errors.
impl From<serde_json::Error> for FlowError {
    fn from(err: serde_json::Error) -> Self {
        FlowError::Gateway(format!("response decoding failed: {}", err))
    }
}

impl From<std::io::Error> for FlowError {
    fn from(err: std::io::Error) -> Self {
        FlowError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for FlowError {
    fn from(err: toml::de::Error) -> Self {
        FlowError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for FlowError {
    fn from(err: toml::ser::Error) -> Self {
        FlowError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl FlowError {
    /// Returns true if resubmitting the same attempt could succeed.
    ///
    /// ## Retryable
    /// - Gateway failures (network issues, provider hiccups)
    ///
    /// ## Non-Retryable
    /// - Validation failures (fix the form first)
    /// - Fatal account errors
    /// - Busy (an attempt is still running)
    ///
    /// The flow itself never retries; this flag tells the storefront
    /// whether showing a "try again" affordance makes sense.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FlowError::Gateway(_))
    }

    /// Returns true if this is a form-validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, FlowError::Validation(_))
    }

    /// Returns true if the payer account is in a state the flow cannot
    /// recover from.
    pub fn is_fatal_auth(&self) -> bool {
        matches!(self, FlowError::FatalAuth(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FlowError::InvalidConfig(_)
                | FlowError::ConfigLoadFailed(_)
                | FlowError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lunas_core::ValidationError;

    #[test]
    fn test_retryable_errors() {
        assert!(FlowError::Gateway("connection reset".into()).is_retryable());

        assert!(!FlowError::Busy.is_retryable());
        assert!(!FlowError::FatalAuth("account locked".into()).is_retryable());
        assert!(!FlowError::InvalidConfig("bad delay".into()).is_retryable());
    }

    #[test]
    fn test_validation_wraps_core_errors() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::Required {
            field: "payment_method".to_string(),
        });

        let err = FlowError::from(errors);
        assert!(err.is_validation());
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("payment_method"));
    }

    #[test]
    fn test_not_found_display() {
        let err = FlowError::NotFound {
            resource: "product".into(),
            id: "RUST-101".into(),
        };
        assert_eq!(err.to_string(), "product not found: RUST-101");
    }

    #[test]
    fn test_payment_url_conversion() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err = FlowError::from(parse_err);
        assert!(matches!(err, FlowError::InvalidPaymentUrl(_)));
    }
}
