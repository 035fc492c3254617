//! # Error Types
//!
//! Domain-specific error types for lavanflow-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lavanflow-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  lavanflow-db errors (separate crate)                                  │
//! │  ├── DbError          - Handler / storage failures (logged)            │
//! │  └── ApiError         - What callers see (opaque message + code)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Caller       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The value is not one of the known order statuses.
    #[error("Unknown order status: {0}")]
    UnknownOrderStatus(String),

    /// The value is not one of the known staff roles.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Order totals add up to more than `Money` can hold.
    #[error("Revenue overflow after {orders} orders")]
    RevenueOverflow { orders: u64 },

    /// A voucher range has no numbers left to issue.
    ///
    /// ## When This Occurs
    /// - The cursor already moved past `end`
    /// - The range was explicitly marked exhausted
    #[error("Voucher range {range_id} is exhausted (end {end})")]
    VoucherRangeExhausted { range_id: String, end: u64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a request body doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
