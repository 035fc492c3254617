//! Order endpoints.

use lavanflow_core::{AnalyticsSummary, NewOrder, Order, OrderStatus, StatusChange};
use lavanflow_db::MockApi;
use url::form_urlencoded;

use super::{decode, encode};
use crate::error::WorkflowResult;

/// `GET /orders`, optionally `?status=`.
pub async fn list(api: &MockApi, status: Option<OrderStatus>) -> WorkflowResult<Vec<Order>> {
    let endpoint = match status {
        Some(status) => format!(
            "/orders?{}",
            form_urlencoded::Serializer::new(String::new())
                .append_pair("status", status.as_str())
                .finish()
        ),
        None => "/orders".to_string(),
    };
    decode(api.get(&endpoint).await?)
}

/// `POST /orders`.
pub async fn create(api: &MockApi, order: &NewOrder) -> WorkflowResult<Order> {
    decode(api.post("/orders", encode(order)?).await?)
}

/// `PATCH /orders/{id}/status`.
pub async fn update_status(api: &MockApi, id: &str, status: OrderStatus) -> WorkflowResult<Order> {
    let endpoint = format!("/orders/{}/status", id);
    decode(api.patch(&endpoint, encode(&StatusChange { status })?).await?)
}

/// `GET /orders/analytics/summary`.
pub async fn summary(api: &MockApi) -> WorkflowResult<AnalyticsSummary> {
    decode(api.get("/orders/analytics/summary").await?)
}
