//! # Typed Endpoint Wrappers
//!
//! Thin functions over [`MockApi`](lavanflow_db::MockApi) that build the
//! endpoint string, send the typed body and decode the typed answer.
//!
//! - [`orders`] - list, create, status change, analytics
//! - [`vouchers`] - ranges and NCF burns
//! - [`audit`] - audit trail

pub mod audit;
pub mod orders;
pub mod vouchers;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::WorkflowResult;

pub(crate) fn encode<T: Serialize>(body: &T) -> WorkflowResult<Value> {
    Ok(serde_json::to_value(body)?)
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> WorkflowResult<T> {
    Ok(serde_json::from_value(value)?)
}
