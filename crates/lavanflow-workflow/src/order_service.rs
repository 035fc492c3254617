//! # Order Service
//!
//! The counter's entry point for orders and fiscal receipts.
//!
//! ## save_order Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderDraft                                                             │
//! │       │                                                                 │
//! │       ├── id: None ──────────► POST /orders                            │
//! │       │                         notify  "New Sale Detected"   (sale)   │
//! │       │                         audit   ORDER_CREATE                   │
//! │       │                                                                 │
//! │       ├── id + status ───────► PATCH /orders/{id}/status               │
//! │       │                         notify  "Status Update"     (status)   │
//! │       │                         audit   ORDER_STATUS_CHANGE            │
//! │       │                                                                 │
//! │       └── id, no status ─────► WorkflowError::Validation               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On the update path every field other than `status` is ignored. The
//! service keeps no state of its own; persistence is the API's job.

use std::sync::Arc;

use lavanflow_core::{
    AuditAction, Money, NewAuditLogEntry, NewOrder, Order, OrderItem, OrderStatus,
    TaxReceiptType, User,
};
use lavanflow_db::{IdGenerator, MockApi, RandomIds};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::api;
use crate::audit::AuditSink;
use crate::error::{WorkflowError, WorkflowResult};
use crate::notification::{Notification, NotificationCategory, NotificationSink};

/// A partial order as edited at the counter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDraft {
    pub id: Option<String>,
    pub code: Option<String>,
    pub customer_id: String,
    pub customer_name: String,
    pub branch_id: String,
    pub items: Vec<OrderItem>,
    pub total: Money,
    pub status: Option<OrderStatus>,
    pub ncf: Option<String>,
}

impl OrderDraft {
    /// Draft for a status change of an existing order.
    pub fn status_change(id: impl Into<String>, status: OrderStatus) -> Self {
        OrderDraft {
            id: Some(id.into()),
            status: Some(status),
            ..OrderDraft::default()
        }
    }

    fn into_new_order(self, code: String) -> NewOrder {
        NewOrder {
            code,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            branch_id: self.branch_id,
            items: self.items,
            total: self.total,
            status: self.status.unwrap_or_default(),
            ncf: self.ncf,
        }
    }
}

/// Order orchestration over the mock API.
pub struct OrderService {
    api: Arc<MockApi>,
    notifier: Arc<dyn NotificationSink>,
    audit: Arc<dyn AuditSink>,
    ids: Arc<dyn IdGenerator>,
}

impl OrderService {
    pub fn new(
        api: Arc<MockApi>,
        notifier: Arc<dyn NotificationSink>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        OrderService {
            api,
            notifier,
            audit,
            ids: Arc::new(RandomIds),
        }
    }

    /// Replaces the generator used for order codes.
    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// All orders, most recent first.
    pub async fn get_orders(&self) -> WorkflowResult<Vec<Order>> {
        api::orders::list(&self.api, None).await
    }

    /// Creates the order or applies its status change, then notifies and audits.
    pub async fn save_order(&self, draft: OrderDraft, user: &User) -> WorkflowResult<Order> {
        match draft.id.clone() {
            None => self.create(draft, user).await,
            Some(id) => {
                let status = draft.status.ok_or_else(|| {
                    WorkflowError::Validation(format!("order {} has no target status", id))
                })?;
                self.change_status(&id, status, user).await
            }
        }
    }

    /// Issues the next NCF for `receipt_type` at `branch_id`.
    ///
    /// Returns an empty string, and records nothing, when no range is left.
    pub async fn generate_ncf(
        &self,
        receipt_type: TaxReceiptType,
        branch_id: &str,
        user: &User,
    ) -> WorkflowResult<String> {
        let ncf = api::vouchers::burn(&self.api, receipt_type, branch_id).await?;

        if ncf.is_empty() {
            warn!(receipt_type = %receipt_type, branch_id = %branch_id, "No NCF available");
            return Ok(ncf);
        }

        self.audit
            .record(NewAuditLogEntry::by(
                user,
                AuditAction::NcfBurn,
                format!("Burned NCF sequence {} for type {}", ncf, receipt_type),
                json!({ "ncf": ncf, "type": receipt_type }),
            ))
            .await?;

        Ok(ncf)
    }

    /// A fresh `ORD-XXXXXX` code.
    pub fn generate_order_code(&self) -> String {
        self.ids.order_code()
    }

    async fn create(&self, draft: OrderDraft, user: &User) -> WorkflowResult<Order> {
        let code = match draft.code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => self.generate_order_code(),
        };

        let order = api::orders::create(&self.api, &draft.into_new_order(code)).await?;
        info!(order_id = %order.id, code = %order.code, user = %user.username, "Order created");

        self.raise(Notification {
            title: "New Sale Detected".to_string(),
            body: format!("{} placed an order for {}.", order.customer_name, order.total),
            category: NotificationCategory::Sale,
            reference: order.code.clone(),
        });

        self.audit
            .record(NewAuditLogEntry::by(
                user,
                AuditAction::OrderCreate,
                format!("Created new order {} for {}", order.code, order.customer_name),
                json!({
                    "orderCode": order.code,
                    "customer": order.customer_name,
                    "total": order.total,
                }),
            ))
            .await?;

        Ok(order)
    }

    async fn change_status(&self, id: &str, status: OrderStatus, user: &User) -> WorkflowResult<Order> {
        let order = api::orders::update_status(&self.api, id, status).await?;
        info!(order_id = %order.id, status = %order.status, user = %user.username, "Order status changed");

        self.raise(Notification {
            title: "Status Update".to_string(),
            body: format!("Order {} is now {}.", order.code, order.status),
            category: NotificationCategory::Status,
            reference: order.code.clone(),
        });

        self.audit
            .record(NewAuditLogEntry::by(
                user,
                AuditAction::OrderStatusChange,
                format!("Changed order {} status to {}", order.code, order.status),
                json!({ "orderCode": order.code, "newStatus": order.status }),
            ))
            .await?;

        Ok(order)
    }

    /// The order is already saved at this point; a lost toast is only logged.
    fn raise(&self, notification: Notification) {
        if let Err(err) = self.notifier.notify(notification) {
            warn!(error = %err, "Notification dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_draft_deserializes() {
        let draft: OrderDraft =
            serde_json::from_value(json!({"id": "o-1", "status": "In Process"})).unwrap();
        assert_eq!(draft, OrderDraft::status_change("o-1", OrderStatus::InProcess));
    }

    #[test]
    fn test_new_order_defaults_to_received() {
        let new_order = OrderDraft::default().into_new_order("ORD-000001".to_string());
        assert_eq!(new_order.status, OrderStatus::Received);
        assert_eq!(new_order.code, "ORD-000001");
    }
}
