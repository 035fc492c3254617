//! # Workflow Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Api           ← the mock API call failed (opaque, passed through)     │
//! │  Validation    ← the draft cannot be dispatched (e.g. id, no status)   │
//! │  Notification  ← the notification sink refused the message            │
//! │  UnexpectedResponse ← the API answered with a shape we cannot read     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lavanflow_db::ApiError;
use thiserror::Error;

/// Result type alias for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The mock API rejected the call. Propagated unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The draft does not describe a create or a status change.
    #[error("Invalid order draft: {0}")]
    Validation(String),

    /// Delivering a notification failed.
    #[error("Notification failed: {0}")]
    Notification(String),

    /// The API returned something other than the expected type.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<serde_json::Error> for WorkflowError {
    fn from(err: serde_json::Error) -> Self {
        WorkflowError::UnexpectedResponse(err.to_string())
    }
}
