//! # Validation Module
//!
//! Checks applied to request bodies before a handler mutates the document.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Missing fields, wrong types, unknown enum values                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Empty names, bad phone numbers, negative totals                   │
//! │  └── Inverted voucher bounds                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Handler                                                      │
//! │  └── Existence checks (order id, matching voucher range)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{NewCustomer, NewOrder, NewStaffMember, NewVoucherRange};
use crate::{MAX_ORDER_TOTAL_CENTS, NCF_MAX_CURSOR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_SEARCH_LEN: usize = 100;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a non-empty, bounded display name.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - Digits plus `+`, `-`, spaces and parentheses only
///
/// ```rust
/// use lavanflow_core::validation::validate_phone;
///
/// assert!(validate_phone("809-555-0101").is_ok());
/// assert!(validate_phone("call me").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, +, - and parentheses".to_string(),
        });
    }

    Ok(())
}

/// Normalizes a customer search term.
///
/// Empty input means "no filter"; the result is trimmed and lowercased.
pub fn normalize_search(query: &str) -> ValidationResult<Option<String>> {
    let query = query.trim();

    if query.len() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    if query.is_empty() {
        Ok(None)
    } else {
        Ok(Some(query.to_lowercase()))
    }
}

// =============================================================================
// Body Validators
// =============================================================================

pub fn validate_new_customer(customer: &NewCustomer) -> ValidationResult<()> {
    validate_name("name", &customer.name)?;
    validate_phone(&customer.phone)
}

pub fn validate_new_staff(staff: &NewStaffMember) -> ValidationResult<()> {
    validate_name("username", &staff.username)?;
    validate_name("branchId", &staff.branch_id)
}

pub fn validate_new_order(order: &NewOrder) -> ValidationResult<()> {
    validate_name("customerName", &order.customer_name)?;

    if order.total.is_negative() || order.total.cents() > MAX_ORDER_TOTAL_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "total".to_string(),
            min: 0,
            max: MAX_ORDER_TOTAL_CENTS,
        });
    }

    if let Some(item) = order.items.iter().find(|item| item.quantity <= 0) {
        return Err(ValidationError::MustBePositive {
            field: format!("quantity of {}", item.name),
        });
    }

    Ok(())
}

pub fn validate_new_voucher_range(range: &NewVoucherRange) -> ValidationResult<()> {
    validate_name("prefix", &range.prefix)?;

    if range.start == 0 || range.start > range.end {
        return Err(ValidationError::InvalidFormat {
            field: "start".to_string(),
            reason: format!("range {}..{} must satisfy 1 <= start <= end", range.start, range.end),
        });
    }

    if range.end > NCF_MAX_CURSOR {
        return Err(ValidationError::OutOfRange {
            field: "end".to_string(),
            min: 1,
            max: NCF_MAX_CURSOR as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
