//! # Error Types
//!
//! Domain-specific error types for lunas-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lunas-core errors (this file)                                         │
//! │  ├── CoreError         - Pricing/domain errors                         │
//! │  ├── ValidationError   - One field-scoped input failure                │
//! │  └── ValidationErrors  - Everything wrong with a payload, collected    │
//! │                                                                         │
//! │  lunas-flow errors (separate crate)                                    │
//! │  └── FlowError         - Submission protocol failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → ValidationErrors → FlowError → Storefront     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, tier id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each validation error names the form field it belongs to, so the
//!    storefront can highlight exactly that input
//!
//! A coupon the pipeline cannot interpret is NOT an error: it becomes a
//! `CouponOutcome::Ignored` in the pricing result and checkout proceeds.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
///
/// These errors represent domain failures inside the pricing pipeline.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A checkout link pinned a price tier the product does not have.
    ///
    /// ## When This Occurs
    /// - The tier was deleted after the link was shared
    /// - The link was hand-edited or mistyped
    #[error("Price tier not found: {0}")]
    PriceTierNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when checkout input doesn't meet requirements.
/// Used for early validation before anything leaves the device.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid email, invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// The form field this error belongs to.
    ///
    /// The storefront keys error rendering on this value, so it must
    /// match the field names the checkout page uses.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Collected Validation Errors
// =============================================================================

/// Every validation failure in a payload, collected.
///
/// Checks are independent: a bad phone number does not hide a bad email.
/// The storefront gets the full list in one round and highlights each
/// field at once.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one failure.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// True when nothing failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// All failures, in check order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// True when some failure concerns the given field.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PriceTierNotFound("tier-123".to_string());
        assert_eq!(err.to_string(), "Price tier not found: tier-123");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooShort {
            field: "phone".to_string(),
            min: 10,
        };
        assert_eq!(err.to_string(), "phone must be at least 10 characters");
    }

    #[test]
    fn test_validation_error_field_accessor() {
        let err = ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        };
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_collected_errors_display_and_lookup() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::Required {
            field: "name".to_string(),
        });
        errors.push(ValidationError::TooShort {
            field: "phone".to_string(),
            min: 10,
        });

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("phone"));
        assert!(!errors.has_field("email"));
        assert_eq!(
            errors.to_string(),
            "name is required; phone must be at least 10 characters"
        );
    }
}
