//! # System Repository
//!
//! Health and backup endpoints. Both are synthesized: the health report
//! measures nothing and a "backup" only records that one was requested.

use chrono::Utc;
use lavanflow_core::{BackupKind, BackupRecord, BackupStatus, HealthReport};
use tracing::info;

use crate::document::Document;
use crate::ids::IdGenerator;

/// Description attached to every triggered backup.
pub const BACKUP_DETAILS: &str = "Full state snapshot archived to LavanCloud.";

#[derive(Clone, Copy)]
pub struct SystemRepository<'a> {
    ids: &'a dyn IdGenerator,
}

impl<'a> SystemRepository<'a> {
    pub fn new(ids: &'a dyn IdGenerator) -> Self {
        SystemRepository { ids }
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            database: "ONLINE".to_string(),
            latency: self.ids.health_latency_ms(),
            last_backup: Utc::now(),
            sync_queue: 0,
        }
    }

    /// Backups, most recent first.
    pub fn backup_history(&self, doc: &Document) -> Vec<BackupRecord> {
        doc.backups.clone()
    }

    pub fn trigger_backup(&self, doc: &mut Document) -> BackupRecord {
        let record = BackupRecord {
            id: self.ids.record_id(),
            timestamp: Utc::now().timestamp_millis(),
            kind: BackupKind::Manual,
            status: BackupStatus::Success,
            file_size: self.ids.backup_size_kb(),
            details: BACKUP_DETAILS.to_string(),
        };

        info!(backup_id = %record.id, file_size = record.file_size, "Backup recorded");
        doc.backups.insert(0, record.clone());
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{RandomIds, SequentialIds};

    #[test]
    fn test_health_is_synthesized() {
        let report = SystemRepository::new(&RandomIds).health();
        assert_eq!(report.database, "ONLINE");
        assert_eq!(report.sync_queue, 0);
        assert!((10..60).contains(&report.latency));
    }

    #[test]
    fn test_trigger_backup_prepends() {
        let ids = SequentialIds::new();
        let repo = SystemRepository::new(&ids);
        let mut doc = Document::default();

        repo.trigger_backup(&mut doc);
        let latest = repo.trigger_backup(&mut doc);

        let history = repo.backup_history(&doc);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, latest.id);
        assert_eq!(latest.status, BackupStatus::Success);
        assert_eq!(latest.details, BACKUP_DETAILS);
    }
}
