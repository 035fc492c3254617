//! # Notifications
//!
//! User-facing toasts raised by the workflow ("New Sale Detected", ...).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderService ──notify()──► NotificationSink                           │
//! │                              ├── NotificationChannel ──► mpsc ──► UI   │
//! │                              └── NoOpNotifier (tests, headless runs)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sinks are synchronous: raising a notification never waits on the UI.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{WorkflowError, WorkflowResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    /// A new order was taken.
    Sale,
    /// An order changed status.
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub category: NotificationCategory,
    /// Order code the notification refers to.
    pub reference: String,
}

/// Receives notifications raised by the workflow.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification) -> WorkflowResult<()>;
}

/// Discards every notification.
pub struct NoOpNotifier;

impl NotificationSink for NoOpNotifier {
    fn notify(&self, _notification: Notification) -> WorkflowResult<()> {
        Ok(())
    }
}

/// Forwards notifications to a receiver, typically the UI event loop.
#[derive(Debug, Clone)]
pub struct NotificationChannel {
    tx: mpsc::UnboundedSender<Notification>,
}

impl NotificationChannel {
    /// Creates the sink and the receiving end.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (NotificationChannel { tx }, rx)
    }
}

impl NotificationSink for NotificationChannel {
    fn notify(&self, notification: Notification) -> WorkflowResult<()> {
        debug!(title = %notification.title, reference = %notification.reference, "Notification raised");
        self.tx
            .send(notification)
            .map_err(|_| WorkflowError::Notification("receiver dropped".to_string()))
    }
}
