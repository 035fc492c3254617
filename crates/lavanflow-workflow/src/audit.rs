//! # Audit Sink
//!
//! Where the workflow records who did what. [`ApiAuditSink`] writes through
//! `POST /audit-logs`; `record` returns once the entry is persisted.

use std::sync::Arc;

use async_trait::async_trait;
use lavanflow_core::NewAuditLogEntry;
use lavanflow_db::MockApi;
use tracing::info;

use crate::api;
use crate::error::WorkflowResult;

#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: NewAuditLogEntry) -> WorkflowResult<()>;
}

/// Persists audit entries through the mock API.
#[derive(Debug, Clone)]
pub struct ApiAuditSink {
    api: Arc<MockApi>,
}

impl ApiAuditSink {
    pub fn new(api: Arc<MockApi>) -> Self {
        ApiAuditSink { api }
    }
}

#[async_trait]
impl AuditSink for ApiAuditSink {
    async fn record(&self, entry: NewAuditLogEntry) -> WorkflowResult<()> {
        let saved = api::audit::append(&self.api, &entry).await?;
        info!(
            entry_id = %saved.id,
            user = %saved.user_name,
            action = ?saved.action,
            "{}",
            saved.description
        );
        Ok(())
    }
}
