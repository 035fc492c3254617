//! # The Document
//!
//! The whole data set lives in one JSON object. Every endpoint call loads it
//! in full and, if it mutates, writes it back in full.
//!
//! ```json
//! {
//!   "branches":  [...],  "inventory": [...],  "customers": [...],
//!   "orders":    [...],  "staff":     [...],  "auditLogs": [...],
//!   "vouchers":  [...],  "backups":   [...]
//! }
//! ```

use lavanflow_core::{
    AuditLogEntry, BackupRecord, Branch, Customer, Garment, Order, StaffMember, VoucherRange,
};
use serde::{Deserialize, Serialize};

use crate::error::{DbError, DbResult};

/// Root object of the persisted store. Owns every entity exclusively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub inventory: Vec<Garment>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    /// Most recent first.
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    /// Most recent first.
    #[serde(default)]
    pub audit_logs: Vec<AuditLogEntry>,
    #[serde(default)]
    pub vouchers: Vec<VoucherRange>,
    /// Most recent first.
    #[serde(default)]
    pub backups: Vec<BackupRecord>,
}

impl Document {
    /// Parses a serialized document.
    pub fn from_json(contents: &str) -> DbResult<Self> {
        serde_json::from_str(contents).map_err(|e| DbError::Serialization(e.to_string()))
    }

    /// Serializes the document compactly.
    pub fn to_json(&self) -> DbResult<String> {
        serde_json::to_string(self).map_err(|e| DbError::Serialization(e.to_string()))
    }
}
