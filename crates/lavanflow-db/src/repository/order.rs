//! # Order Repository
//!
//! ## Status Transitions and Shelf Locations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Received ──► In Process ──► Completed ──► Delivered                   │
//! │                                  │                                      │
//! │                                  └─ first arrival with no location:    │
//! │                                     location = "Shelf C-17"            │
//! │                                                                         │
//! │  Any later update keeps the location it already has.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions are not restricted to the arrow order; the counter can set
//! any status at any time.

use chrono::Utc;
use lavanflow_core::validation::validate_new_order;
use lavanflow_core::{AnalyticsSummary, NewOrder, Order, OrderStatus};
use tracing::debug;

use crate::document::Document;
use crate::error::{DbError, DbResult};
use crate::ids::IdGenerator;

#[derive(Clone, Copy)]
pub struct OrderRepository<'a> {
    ids: &'a dyn IdGenerator,
}

impl<'a> OrderRepository<'a> {
    pub fn new(ids: &'a dyn IdGenerator) -> Self {
        OrderRepository { ids }
    }

    /// Orders, most recent first, optionally filtered by status name.
    ///
    /// An unrecognized status name matches nothing.
    pub fn list(&self, doc: &Document, status: Option<&str>) -> Vec<Order> {
        match status {
            None => doc.orders.clone(),
            Some(raw) => match raw.parse::<OrderStatus>() {
                Ok(status) => doc
                    .orders
                    .iter()
                    .filter(|o| o.status == status)
                    .cloned()
                    .collect(),
                Err(_) => Vec::new(),
            },
        }
    }

    /// Inserts a new order at the front with a generated id.
    pub fn create(&self, doc: &mut Document, new_order: NewOrder) -> DbResult<Order> {
        validate_new_order(&new_order)?;

        let mut new_order = new_order;
        if new_order.code.trim().is_empty() {
            new_order.code = self.ids.order_code();
        }

        let id = self.unused_id(doc);
        let order = new_order.into_order(id, Utc::now());

        debug!(order_id = %order.id, code = %order.code, "Order created");
        doc.orders.insert(0, order.clone());
        Ok(order)
    }

    /// Sets the status of order `id`, parking it on a shelf on first completion.
    pub fn update_status(
        &self,
        doc: &mut Document,
        id: &str,
        status: OrderStatus,
    ) -> DbResult<Order> {
        let order = doc
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| DbError::not_found("Order", id))?;

        order.status = status;
        if status == OrderStatus::Completed && order.location.is_none() {
            let shelf = self.ids.shelf_location().to_string();
            debug!(order_id = %id, location = %shelf, "Order shelved");
            order.location = Some(shelf);
        }

        Ok(order.clone())
    }

    /// Counts per status and total revenue over every order.
    pub fn summary(&self, doc: &Document) -> DbResult<AnalyticsSummary> {
        Ok(AnalyticsSummary::from_orders(&doc.orders)?)
    }

    fn unused_id(&self, doc: &Document) -> String {
        loop {
            let id = self.ids.record_id();
            if !doc.orders.iter().any(|o| o.id == id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use lavanflow_core::{Money, OrderItem};

    fn new_order(total: i64) -> NewOrder {
        NewOrder {
            code: String::new(),
            customer_id: "c-1".to_string(),
            customer_name: "María Rodríguez".to_string(),
            branch_id: "br-1".to_string(),
            items: vec![OrderItem {
                garment_id: "g-1".to_string(),
                name: "Shirt".to_string(),
                quantity: 2,
                unit_price: Money::from_cents(total / 2),
            }],
            total: Money::from_cents(total),
            status: OrderStatus::Received,
            ncf: None,
        }
    }

    #[test]
    fn test_create_inserts_at_front_with_generated_code() {
        let ids = SequentialIds::new();
        let repo = OrderRepository::new(&ids);
        let mut doc = Document::default();

        let first = repo.create(&mut doc, new_order(300_00)).unwrap();
        let second = repo.create(&mut doc, new_order(500_00)).unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.code.starts_with("ORD-"));
        assert_eq!(doc.orders[0].id, second.id);
        assert!(first.location.is_none());
    }

    #[test]
    fn test_create_keeps_supplied_code() {
        let ids = SequentialIds::new();
        let repo = OrderRepository::new(&ids);
        let mut doc = Document::default();

        let mut draft = new_order(100_00);
        draft.code = "ORD-ABC123".to_string();
        assert_eq!(repo.create(&mut doc, draft).unwrap().code, "ORD-ABC123");
    }

    #[test]
    fn test_create_rejects_negative_total() {
        let ids = SequentialIds::new();
        let repo = OrderRepository::new(&ids);
        let mut doc = Document::default();

        let result = repo.create(&mut doc, new_order(-100));
        assert!(matches!(result, Err(DbError::Validation(_))));
        assert!(doc.orders.is_empty());
    }

    #[test]
    fn test_completed_assigns_location_once() {
        let ids = SequentialIds::new();
        let repo = OrderRepository::new(&ids);
        let mut doc = Document::default();
        let order = repo.create(&mut doc, new_order(100_00)).unwrap();

        let done = repo
            .update_status(&mut doc, &order.id, OrderStatus::Completed)
            .unwrap();
        let location = done.location.clone().unwrap();
        assert!(location.starts_with("Shelf "));

        let again = repo
            .update_status(&mut doc, &order.id, OrderStatus::Completed)
            .unwrap();
        assert_eq!(again.location.as_deref(), Some(location.as_str()));

        let delivered = repo
            .update_status(&mut doc, &order.id, OrderStatus::Delivered)
            .unwrap();
        assert_eq!(delivered.location.as_deref(), Some(location.as_str()));
    }

    #[test]
    fn test_in_process_does_not_assign_location() {
        let ids = SequentialIds::new();
        let repo = OrderRepository::new(&ids);
        let mut doc = Document::default();
        let order = repo.create(&mut doc, new_order(100_00)).unwrap();

        let updated = repo
            .update_status(&mut doc, &order.id, OrderStatus::InProcess)
            .unwrap();
        assert!(updated.location.is_none());
    }

    #[test]
    fn test_update_unknown_order() {
        let ids = SequentialIds::new();
        let repo = OrderRepository::new(&ids);
        let mut doc = Document::default();

        let result = repo.update_status(&mut doc, "missing", OrderStatus::Delivered);
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }

    #[test]
    fn test_list_filters_by_status() {
        let ids = SequentialIds::new();
        let repo = OrderRepository::new(&ids);
        let mut doc = Document::default();
        let a = repo.create(&mut doc, new_order(100_00)).unwrap();
        repo.create(&mut doc, new_order(200_00)).unwrap();
        repo.update_status(&mut doc, &a.id, OrderStatus::InProcess)
            .unwrap();

        assert_eq!(repo.list(&doc, None).len(), 2);
        assert_eq!(repo.list(&doc, Some("In Process")).len(), 1);
        assert_eq!(repo.list(&doc, Some("Received")).len(), 1);
        assert!(repo.list(&doc, Some("Lost")).is_empty());
    }

    #[test]
    fn test_summary_counts_every_order() {
        let ids = SequentialIds::new();
        let repo = OrderRepository::new(&ids);
        let mut doc = Document::default();
        let a = repo.create(&mut doc, new_order(100_00)).unwrap();
        repo.create(&mut doc, new_order(250_50)).unwrap();
        repo.update_status(&mut doc, &a.id, OrderStatus::Delivered)
            .unwrap();

        let summary = repo.summary(&doc).unwrap();
        assert_eq!(summary.order_count(), 2);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.received, 1);
        assert_eq!(summary.revenue, Money::from_cents(350_50));
    }

    #[test]
    fn test_summary_reports_revenue_overflow() {
        let ids = SequentialIds::new();
        let repo = OrderRepository::new(&ids);
        let mut doc = Document::default();
        let order = repo.create(&mut doc, new_order(100_00)).unwrap();

        // Totals this large only arrive through a hand-edited document.
        for id in ["o-big-1", "o-big-2"] {
            let mut big = order.clone();
            big.id = id.to_string();
            big.total = Money::from_cents(i64::MAX / 2 + 1);
            doc.orders.push(big);
        }

        assert!(matches!(repo.summary(&doc), Err(DbError::Overflow(_))));
    }

    #[test]
    fn test_create_rejects_oversized_total() {
        let ids = SequentialIds::new();
        let repo = OrderRepository::new(&ids);
        let mut doc = Document::default();

        let result = repo.create(&mut doc, new_order(i64::MAX / 2 + 1));
        assert!(matches!(result, Err(DbError::Validation(_))));
        assert!(doc.orders.is_empty());
    }
}
