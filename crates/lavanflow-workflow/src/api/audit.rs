//! Audit trail endpoints.

use lavanflow_core::{Ack, AuditLogEntry, NewAuditLogEntry};
use lavanflow_db::MockApi;

use super::{decode, encode};
use crate::error::WorkflowResult;

/// `GET /audit-logs`, most recent first.
pub async fn list(api: &MockApi) -> WorkflowResult<Vec<AuditLogEntry>> {
    decode(api.get("/audit-logs").await?)
}

/// `POST /audit-logs`.
pub async fn append(api: &MockApi, entry: &NewAuditLogEntry) -> WorkflowResult<AuditLogEntry> {
    decode(api.post("/audit-logs", encode(entry)?).await?)
}

/// `DELETE /audit-logs`.
pub async fn clear(api: &MockApi) -> WorkflowResult<Ack> {
    decode(api.delete("/audit-logs").await?)
}
