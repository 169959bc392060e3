//! # Validation Module
//!
//! Input validation utilities for Lunas.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront (TypeScript)                                      │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback while typing                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                           │
//! │  ├── The authoritative checks, before anything leaves the device       │
//! │  └── A payload that fails here NEVER reaches the network               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Order backend                                                │
//! │  ├── NOT NULL / FK constraints                                         │
//! │  └── Fraud and rate limiting                                           │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checks are independent and ALL collected: the customer sees every
//! problem with the form at once, keyed by field, not one at a time.
//!
//! ## Usage
//! ```rust,no_run
//! use lunas_core::validation::{validate_payer_phone, validate_payer_email};
//!
//! // Validate contact fields before composing an order
//! validate_payer_phone("081234567890").unwrap();
//! validate_payer_email("andi@example.com").unwrap();
//! ```

use crate::error::{ValidationError, ValidationErrors};
use crate::types::{OrderItem, OrderPayload};
use crate::MIN_PHONE_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Payer Field Validators
// =============================================================================

/// Validates the payer's name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use lunas_core::validation::validate_payer_name;
///
/// assert!(validate_payer_name("Andi Wijaya").is_ok());
/// assert!(validate_payer_name("").is_err());
/// assert!(validate_payer_name("   ").is_err());
/// ```
pub fn validate_payer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates the payer's phone number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at least 10 characters (local numbers are 10-13 digits)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Checkout: Contact Form                                                 │
/// │                                                                         │
/// │  User enters phone: "0812345"                                          │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_payer_phone("0812345") ← THIS FUNCTION                       │
/// │       │                                                                 │
/// │       ├── empty? → Error: "phone is required"                          │
/// │       │                                                                 │
/// │       ├── < 10 chars? → Error: "phone must be at least 10 characters"  │
/// │       │                                                                 │
/// │       └── OK → Field passes, form may submit                           │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_payer_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.chars().count() < MIN_PHONE_LEN {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: MIN_PHONE_LEN,
        });
    }

    Ok(())
}

/// Validates the payer's email address.
///
/// ## Rules
/// - Must not be empty
/// - Must have the `name@domain.tld` shape
///
/// No full RFC 5322 parsing: the backend re-verifies, this check exists
/// to catch typos before an order is created against a bad address.
///
/// ## Example
/// ```rust
/// use lunas_core::validation::validate_payer_email;
///
/// assert!(validate_payer_email("andi@example.com").is_ok());
/// assert!(validate_payer_email("andi@example").is_err());
/// assert!(validate_payer_email("not-an-email").is_err());
/// ```
pub fn validate_payer_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if !email_has_valid_shape(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@domain.tld".to_string(),
        });
    }

    Ok(())
}

/// Shape check: non-empty local part, one `@`, dotted domain, no spaces.
fn email_has_valid_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

// =============================================================================
// Order-Level Validators
// =============================================================================

/// Validates the chosen payment method.
///
/// ## Rules
/// - A method must be selected (non-empty code)
pub fn validate_payment_method(method: Option<&str>) -> ValidationResult<()> {
    match method {
        Some(code) if !code.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::Required {
            field: "payment_method".to_string(),
        }),
    }
}

/// Validates the ordered items.
///
/// ## Rules
/// - At least one item
/// - Every item references a product
/// - Every quantity is positive
pub fn validate_items(items: &[OrderItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    for item in items {
        if item.product_id.trim().is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: "items".to_string(),
                reason: "every item needs a product id".to_string(),
            });
        }
        if item.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a PPN percentage.
///
/// ## Rules
/// - Must be between 0 and 100
pub fn validate_ppn(pct: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "ppn".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use lunas_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    // Try to parse as UUID
    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Payload Validation
// =============================================================================

/// Runs every payload check and collects all failures.
///
/// ## Checks
/// 1. payer name present
/// 2. payer phone present, ≥ 10 characters
/// 3. payer email present, valid shape
/// 4. payment method selected
/// 5. at least one item, each with a product and a positive quantity
///
/// A payload that fails here must never be sent anywhere.
pub fn validate_payload(payload: &OrderPayload) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    match &payload.payer {
        Some(payer) => {
            if let Err(e) = validate_payer_name(&payer.name) {
                errors.push(e);
            }
            if let Err(e) = validate_payer_phone(&payer.phone) {
                errors.push(e);
            }
            if let Err(e) = validate_payer_email(&payer.email) {
                errors.push(e);
            }
        }
        // No contact form at all: report every payer field at once
        None => {
            for field in ["name", "phone", "email"] {
                errors.push(ValidationError::Required {
                    field: field.to_string(),
                });
            }
        }
    }

    if let Err(e) = validate_payment_method(payload.payment_method.as_deref()) {
        errors.push(e);
    }

    if let Err(e) = validate_items(&payload.items) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Payer;

    #[test]
    fn test_validate_payer_name() {
        assert!(validate_payer_name("Andi Wijaya").is_ok());
        assert!(validate_payer_name("").is_err());
        assert!(validate_payer_name("   ").is_err());
        assert!(validate_payer_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_payer_phone() {
        assert!(validate_payer_phone("081234567890").is_ok());
        assert!(validate_payer_phone("0812345678").is_ok()); // exactly 10

        assert!(validate_payer_phone("").is_err());
        let err = validate_payer_phone("12345").unwrap_err();
        assert_eq!(err.field(), "phone");
        assert!(matches!(err, ValidationError::TooShort { min: 10, .. }));
    }

    #[test]
    fn test_validate_payer_email() {
        assert!(validate_payer_email("andi@example.com").is_ok());
        assert!(validate_payer_email("a.b+c@sub.example.co.id").is_ok());

        assert!(validate_payer_email("").is_err());
        assert!(validate_payer_email("andi").is_err());
        assert!(validate_payer_email("andi@example").is_err());
        assert!(validate_payer_email("@example.com").is_err());
        assert!(validate_payer_email("andi@.com").is_err());
        assert!(validate_payer_email("andi @example.com").is_err());
        assert!(validate_payer_email("andi@exa@mple.com").is_err());
    }

    #[test]
    fn test_validate_payment_method() {
        assert!(validate_payment_method(Some("bank_transfer")).is_ok());
        assert!(validate_payment_method(Some("")).is_err());
        assert!(validate_payment_method(Some("   ")).is_err());
        assert!(validate_payment_method(None).is_err());
    }

    #[test]
    fn test_validate_items() {
        assert!(validate_items(&[OrderItem::for_product("p-1")]).is_ok());
        assert!(validate_items(&[]).is_err());

        let mut no_product = OrderItem::for_product("");
        no_product.quantity = 1;
        assert!(validate_items(&[no_product]).is_err());

        let mut zero_qty = OrderItem::for_product("p-1");
        zero_qty.quantity = 0;
        assert!(validate_items(&[zero_qty]).is_err());
    }

    #[test]
    fn test_validate_ppn() {
        assert!(validate_ppn(0.0).is_ok());
        assert!(validate_ppn(11.0).is_ok());
        assert!(validate_ppn(100.0).is_ok());
        assert!(validate_ppn(-1.0).is_err());
        assert!(validate_ppn(101.0).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }

    #[test]
    fn test_validate_payload_collects_everything() {
        let payload = OrderPayload::builder()
            .payer(Payer {
                name: "".to_string(),
                email: "nope".to_string(),
                phone: "12345".to_string(),
                company: None,
                position: None,
            })
            .build();

        let errors = validate_payload(&payload).unwrap_err();
        assert!(errors.has_field("name"));
        assert!(errors.has_field("phone"));
        assert!(errors.has_field("email"));
        assert!(errors.has_field("payment_method"));
        assert!(errors.has_field("items"));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_validate_payload_missing_payer_reports_all_contact_fields() {
        let payload = OrderPayload::builder()
            .payment_method("bank_transfer")
            .add_item(OrderItem::for_product("p-1"))
            .build();

        let errors = validate_payload(&payload).unwrap_err();
        assert!(errors.has_field("name"));
        assert!(errors.has_field("phone"));
        assert!(errors.has_field("email"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_validate_payload_ok() {
        let payload = OrderPayload::builder()
            .payer(Payer {
                name: "Andi Wijaya".to_string(),
                email: "andi@example.com".to_string(),
                phone: "081234567890".to_string(),
                company: None,
                position: None,
            })
            .payment_method("bank_transfer")
            .add_item(OrderItem::for_product("p-1"))
            .build();

        assert!(validate_payload(&payload).is_ok());
    }
}
