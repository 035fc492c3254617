//! # lavanflow-workflow: Order Workflow for LavanFlow OS
//!
//! Everything the counter does with an order, as one call each: take a
//! sale, move it through the wash line, issue its fiscal receipt number.
//! Each call goes through the mock API and then raises a notification and
//! writes the audit trail.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Workflow                                    │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    OrderService                                  │  │
//! │  │  save_order(draft, user)   generate_ncf(type, branch, user)      │  │
//! │  └───────┬───────────────────────────┬───────────────────┬──────────┘  │
//! │          ▼                           ▼                   ▼             │
//! │  ┌────────────────┐  ┌─────────────────────┐  ┌────────────────────┐   │
//! │  │ api::orders    │  │ NotificationSink    │  │ AuditSink          │   │
//! │  │ api::vouchers  │  │                     │  │                    │   │
//! │  │ api::audit     │  │ NotificationChannel │  │ ApiAuditSink       │   │
//! │  │   │            │  │  (mpsc → UI)        │  │  (POST /audit-logs)│   │
//! │  └───┼────────────┘  └─────────────────────┘  └────────────────────┘   │
//! │      ▼                                                                  │
//! │  lavanflow_db::MockApi                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`order_service`] - `OrderService` and `OrderDraft`
//! - [`api`] - Typed endpoint wrappers
//! - [`notification`] - Notification sink trait and channel
//! - [`audit`] - Audit sink trait and API-backed sink
//! - [`error`] - Workflow error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lavanflow_db::{MockApi, StoreConfig};
//! use lavanflow_workflow::{ApiAuditSink, NotificationChannel, OrderService};
//!
//! let api = Arc::new(MockApi::open(&StoreConfig::from_env()?).await?);
//! let (notifier, mut toasts) = NotificationChannel::new();
//! let service = OrderService::new(
//!     api.clone(),
//!     Arc::new(notifier),
//!     Arc::new(ApiAuditSink::new(api)),
//! );
//!
//! let ncf = service.generate_ncf(TaxReceiptType::FinalConsumer, "br-1", &user).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod audit;
pub mod error;
pub mod notification;
pub mod order_service;

// =============================================================================
// Re-exports
// =============================================================================

pub use audit::{ApiAuditSink, AuditSink};
pub use error::{WorkflowError, WorkflowResult};
pub use notification::{
    NoOpNotifier, Notification, NotificationCategory, NotificationChannel, NotificationSink,
};
pub use order_service::{OrderDraft, OrderService};
