//! # Store Error Types
//!
//! Two layers of errors live here:
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Handler / storage failure                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← full detail, logged at the router boundary    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError ← opaque message + machine-readable code                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Workflow service / front end                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lavanflow_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Message every failed endpoint call surfaces, whatever the cause.
pub const COMMUNICATION_FAILURE: &str = "Communication with secure nodes failed.";

// =============================================================================
// DbError
// =============================================================================

/// Failures inside the store or a handler.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in the document.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// No handler is registered for this verb and path.
    #[error("Endpoint {method} {endpoint} not implemented in mock client")]
    RouteNotFound { method: String, endpoint: String },

    /// Request body missing or not the expected shape.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Request body failed a business rule.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Generated value clashes with existing data.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Reading or writing the document failed.
    #[error("Storage failure: {0}")]
    Storage(String),

    /// The persisted document could not be (de)serialized.
    #[error("Serialization failure: {0}")]
    Serialization(String),

    /// Stored figures cannot be aggregated without overflowing.
    #[error("Aggregate overflow: {0}")]
    Overflow(String),

    /// Store configuration is invalid.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<std::io::Error> for DbError {
    fn from(err: std::io::Error) -> Self {
        DbError::Storage(err.to_string())
    }
}

impl From<CoreError> for DbError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(inner) => DbError::Validation(inner),
            err @ CoreError::RevenueOverflow { .. } => DbError::Overflow(err.to_string()),
            other => DbError::InvalidBody(other.to_string()),
        }
    }
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// ApiError
// =============================================================================

/// Error codes attached to [`ApiError`].
///
/// The message is deliberately the same for every code; the code is the
/// only way a caller can tell a missing record from a broken store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown endpoint or missing record.
    NotFound,
    /// Malformed or invalid request body.
    InvalidRequest,
    /// The document could not be read or written.
    StorageFailure,
}

/// What a caller of the mock API receives when a call fails.
///
/// ```json
/// { "code": "NOT_FOUND", "message": "Communication with secure nodes failed." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    /// Wraps any code with the opaque communication-failure message.
    pub fn communication_failure(code: ErrorCode) -> Self {
        ApiError {
            code,
            message: COMMUNICATION_FAILURE.to_string(),
        }
    }
}

impl From<&DbError> for ApiError {
    fn from(err: &DbError) -> Self {
        let code = match err {
            DbError::NotFound { .. } | DbError::RouteNotFound { .. } => ErrorCode::NotFound,
            DbError::InvalidBody(_) | DbError::Validation(_) | DbError::Conflict(_) => {
                ErrorCode::InvalidRequest
            }
            DbError::Storage(_)
            | DbError::Serialization(_)
            | DbError::Overflow(_)
            | DbError::InvalidConfig(_) => ErrorCode::StorageFailure,
        };
        ApiError::communication_failure(code)
    }
}

/// Result type for endpoint calls.
pub type ApiResult<T> = Result<T, ApiError>;
