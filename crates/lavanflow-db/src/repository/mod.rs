//! # Repository Module
//!
//! Per-resource handlers over the in-memory [`Document`](crate::document::Document).
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Repositories Sit                               │
//! │                                                                         │
//! │  MockApi::call(PATCH, "/orders/o-1/status", body)                      │
//! │       │                                                                 │
//! │       │  Route::UpdateOrderStatus { id }                               │
//! │       ▼                                                                 │
//! │  DocumentStore::write(|doc| ...)   ← lock held, document loaded        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── list(doc, status)                                                 │
//! │  ├── create(doc, new_order)                                            │
//! │  ├── update_status(doc, id, status)                                    │
//! │  └── summary(doc)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Document persisted once the closure returns Ok                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories never touch storage themselves; the store decides when a
//! mutation is committed.
//!
//! ## Available Repositories
//!
//! - [`OrderRepository`] - Orders, status transitions, analytics
//! - [`StaffRepository`] - Staff roster
//! - [`CustomerRepository`] - Customers and search
//! - [`VoucherRepository`] - Voucher ranges and NCF burns
//! - [`AuditRepository`] - Audit trail
//! - [`SystemRepository`] - Health and backups
//! - [`catalog`] - Branches and garment inventory

pub mod audit;
pub mod catalog;
pub mod customer;
pub mod order;
pub mod staff;
pub mod system;
pub mod voucher;

pub use audit::AuditRepository;
pub use customer::CustomerRepository;
pub use order::OrderRepository;
pub use staff::StaffRepository;
pub use system::SystemRepository;
pub use voucher::VoucherRepository;
