//! # Audit Repository
//!
//! The audit trail is append-only from the application's point of view;
//! the only destructive operation is clearing it wholesale.

use chrono::Utc;
use lavanflow_core::{AuditLogEntry, NewAuditLogEntry};
use tracing::{debug, warn};

use crate::document::Document;
use crate::ids::IdGenerator;

#[derive(Clone, Copy)]
pub struct AuditRepository<'a> {
    ids: &'a dyn IdGenerator,
}

impl<'a> AuditRepository<'a> {
    pub fn new(ids: &'a dyn IdGenerator) -> Self {
        AuditRepository { ids }
    }

    /// Entries, most recent first.
    pub fn list(&self, doc: &Document) -> Vec<AuditLogEntry> {
        doc.audit_logs.clone()
    }

    /// Records an entry at the front, stamping it if it carries no timestamp.
    pub fn append(&self, doc: &mut Document, entry: NewAuditLogEntry) -> AuditLogEntry {
        let entry = entry.into_entry(self.ids.record_id(), Utc::now());
        debug!(entry_id = %entry.id, action = ?entry.action, user = %entry.user_name, "Audit entry recorded");
        doc.audit_logs.insert(0, entry.clone());
        entry
    }

    pub fn clear(&self, doc: &mut Document) {
        warn!(entries = doc.audit_logs.len(), "Audit trail cleared");
        doc.audit_logs.clear();
    }
}
