//! # Domain Types
//!
//! Entities held by the LavanFlow document, plus the read models the mock
//! endpoints synthesize (analytics, health, backups).
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │    Customer     │   │  VoucherRange   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  code ORD-xxxx  │   │  code CUST-#### │   │  prefix B01     │       │
//! │  │  customer_id ───┼──►│  name, phone    │   │  start..end     │       │
//! │  │  status         │   └─────────────────┘   │  current cursor │       │
//! │  │  location       │                         │  branch_id ─────┼──┐    │
//! │  └─────────────────┘   ┌─────────────────┐   └─────────────────┘  │    │
//! │                        │  StaffMember    │   ┌─────────────────┐  │    │
//! │  ┌─────────────────┐   │  role, schedule │   │     Branch      │◄─┘    │
//! │  │ AuditLogEntry   │   │  branch_id ─────┼──►│  id, name       │       │
//! │  │ append-only     │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cross-entity references are identifiers only; nothing here holds a live
//! reference into another container.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of a laundry order.
///
/// ```text
/// Received ──► In Process ──► Completed ──► Delivered
///                                 │
///                                 └── shelf location assigned here (once)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    Received,
    #[serde(rename = "In Process")]
    InProcess,
    Completed,
    Delivered,
}

impl OrderStatus {
    /// Wire representation, identical to the serde name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Received",
            OrderStatus::InProcess => "In Process",
            OrderStatus::Completed => "Completed",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Received
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Received" => Ok(OrderStatus::Received),
            "In Process" => Ok(OrderStatus::InProcess),
            "Completed" => Ok(OrderStatus::Completed),
            "Delivered" => Ok(OrderStatus::Delivered),
            other => Err(CoreError::UnknownOrderStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// A line on an order: one garment type and how many pieces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub garment_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

/// A customer order.
///
/// Created through `POST /orders`, mutated only through the status
/// endpoint, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-assigned identifier.
    pub id: String,
    /// Human-readable code (`ORD-XXXXXX`).
    pub code: String,
    pub customer_id: String,
    /// Customer name at time of order (frozen).
    pub customer_name: String,
    pub branch_id: String,
    pub items: Vec<OrderItem>,
    pub total: Money,
    pub status: OrderStatus,
    /// Shelf slot, set on the first transition into `Completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Fiscal receipt number issued for this order, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ncf: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /orders`. Carries no identifier; the router assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Left empty to have the router generate one.
    #[serde(default)]
    pub code: String,
    pub customer_id: String,
    pub customer_name: String,
    pub branch_id: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total: Money,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ncf: Option<String>,
}

impl NewOrder {
    /// Materializes the order with its assigned identifier.
    pub fn into_order(self, id: String, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            code: self.code,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            branch_id: self.branch_id,
            items: self.items,
            total: self.total,
            status: self.status,
            location: None,
            ncf: self.ncf,
            created_at,
        }
    }
}

/// Body of `PATCH /orders/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusChange {
    pub status: OrderStatus,
}

/// A shelf slot where finished orders wait for pickup, e.g. `Shelf B-17`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShelfLocation {
    /// Zero-based row index, rendered as a letter starting at `A`.
    pub row: u8,
    /// One-based slot number.
    pub slot: u8,
}

impl fmt::Display for ShelfLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shelf {}-{}", (b'A' + self.row) as char, self.slot)
    }
}

// =============================================================================
// Analytics
// =============================================================================

/// Result of `GET /orders/analytics/summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnalyticsSummary {
    pub received: u64,
    pub processing: u64,
    pub completed: u64,
    pub delivered: u64,
    pub revenue: Money,
}

impl AnalyticsSummary {
    /// Counts orders per status and sums their totals in one pass.
    ///
    /// Fails instead of wrapping when the totals do not fit in `Money`.
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> CoreResult<Self> {
        orders
            .into_iter()
            .try_fold(AnalyticsSummary::default(), |mut summary, order| {
                match order.status {
                    OrderStatus::Received => summary.received += 1,
                    OrderStatus::InProcess => summary.processing += 1,
                    OrderStatus::Completed => summary.completed += 1,
                    OrderStatus::Delivered => summary.delivered += 1,
                }
                summary.revenue = summary.revenue.checked_add(order.total).ok_or(
                    CoreError::RevenueOverflow {
                        orders: summary.order_count(),
                    },
                )?;
                Ok(summary)
            })
    }

    /// Total number of orders counted.
    pub fn order_count(&self) -> u64 {
        self.received + self.processing + self.completed + self.delivered
    }
}

// =============================================================================
// Branches & Inventory
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// A garment type in the service catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Garment {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Money,
}

// =============================================================================
// Customers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    /// Server-generated display code (`CUST-####`).
    pub code: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Customer {
    /// Case-insensitive match on name and code, substring match on phone.
    ///
    /// `needle` is expected to be lowercased already.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.phone.contains(needle)
            || self.code.to_lowercase().contains(needle)
    }
}

/// Body of `POST /customers`. Identifier and code are assigned server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl NewCustomer {
    pub fn into_customer(self, id: String, code: String) -> Customer {
        Customer {
            id,
            code,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }
}

// =============================================================================
// Staff
// =============================================================================

/// Staff roles. The edge gate compares the role cookie against these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Role {
    Admin,
    Salesperson,
    Cashier,
    Special,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Salesperson => "Salesperson",
            Role::Cashier => "Cashier",
            Role::Special => "Special",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "Salesperson" => Ok(Role::Salesperson),
            "Cashier" => Ok(Role::Cashier),
            "Special" => Ok(Role::Special),
            other => Err(CoreError::UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WorkSchedule {
    /// Abbreviated weekday names, e.g. `["Mon", "Tue"]`.
    pub days: Vec<String>,
    /// `HH:MM`, local time.
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub branch_id: String,
    pub is_active: bool,
    pub schedule: WorkSchedule,
}

/// Body of `POST /staff`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewStaffMember {
    pub username: String,
    pub role: Role,
    pub branch_id: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub schedule: WorkSchedule,
}

fn default_active() -> bool {
    true
}

impl NewStaffMember {
    pub fn into_staff(self, id: String) -> StaffMember {
        StaffMember {
            id,
            username: self.username,
            role: self.role,
            branch_id: self.branch_id,
            is_active: self.is_active,
            schedule: self.schedule,
        }
    }
}

/// The user on whose behalf a workflow operation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Role,
}

// =============================================================================
// Audit Log
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    OrderCreate,
    OrderStatusChange,
    NcfBurn,
}

/// An entry in the append-only audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub action: AuditAction,
    pub description: String,
    #[ts(type = "Record<string, unknown>")]
    pub details: serde_json::Value,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /audit-logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewAuditLogEntry {
    pub user_id: String,
    pub user_name: String,
    pub action: AuditAction,
    pub description: String,
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub details: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewAuditLogEntry {
    /// Builds an entry attributed to `user`, stamped by the router on insert.
    pub fn by(
        user: &User,
        action: AuditAction,
        description: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        NewAuditLogEntry {
            user_id: user.id.clone(),
            user_name: user.username.clone(),
            action,
            description: description.into(),
            details,
            timestamp: None,
        }
    }

    pub fn into_entry(self, id: String, now: DateTime<Utc>) -> AuditLogEntry {
        AuditLogEntry {
            id,
            user_id: self.user_id,
            user_name: self.user_name,
            action: self.action,
            description: self.description,
            details: self.details,
            timestamp: self.timestamp.unwrap_or(now),
        }
    }
}

// =============================================================================
// Fiscal Vouchers
// =============================================================================

/// Fiscal receipt types issued per branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TaxReceiptType {
    /// Issued to businesses claiming tax credit.
    #[serde(rename = "Tax Credit (B01)")]
    TaxCredit,
    /// Issued to final consumers.
    #[serde(rename = "Final Consumer (B02)")]
    FinalConsumer,
}

impl TaxReceiptType {
    /// The NCF prefix seeded for this type.
    pub const fn prefix(&self) -> &'static str {
        match self {
            TaxReceiptType::TaxCredit => "B01",
            TaxReceiptType::FinalConsumer => "B02",
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            TaxReceiptType::TaxCredit => "Tax Credit (B01)",
            TaxReceiptType::FinalConsumer => "Final Consumer (B02)",
        }
    }
}

impl fmt::Display for TaxReceiptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum VoucherStatus {
    Active,
    Exhausted,
}

/// A block of sequential fiscal receipt numbers owned by one branch.
///
/// `current` only moves forward; see [`crate::ncf`] for the burn rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VoucherRange {
    pub id: String,
    #[serde(rename = "type")]
    pub receipt_type: TaxReceiptType,
    pub prefix: String,
    pub start: u64,
    pub end: u64,
    pub current: u64,
    pub branch_id: String,
    pub status: VoucherStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /vouchers/burn`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BurnRequest {
    #[serde(rename = "type")]
    pub receipt_type: TaxReceiptType,
    pub branch_id: String,
}

/// Body of `POST /vouchers`: registers a fresh range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewVoucherRange {
    #[serde(rename = "type")]
    pub receipt_type: TaxReceiptType,
    pub prefix: String,
    pub start: u64,
    pub end: u64,
    pub branch_id: String,
}

impl NewVoucherRange {
    pub fn into_range(self, id: String, created_at: DateTime<Utc>) -> VoucherRange {
        VoucherRange {
            id,
            receipt_type: self.receipt_type,
            prefix: self.prefix,
            start: self.start,
            end: self.end,
            current: self.start,
            branch_id: self.branch_id,
            status: VoucherStatus::Active,
            created_at,
        }
    }
}

// =============================================================================
// System
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackupKind {
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackupStatus {
    Success,
}

/// A (synthesized) backup record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BackupRecord {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: BackupKind,
    pub status: BackupStatus,
    /// Reported size in KB.
    pub file_size: u64,
    pub details: String,
}

/// Result of `GET /system/health`. Synthesized, not measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub database: String,
    /// Milliseconds.
    pub latency: u64,
    #[ts(as = "String")]
    pub last_backup: DateTime<Utc>,
    pub sync_queue: u64,
}

/// Acknowledgement body for deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub const fn ok() -> Self {
        Ack { success: true }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
