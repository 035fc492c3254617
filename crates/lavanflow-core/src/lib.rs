//! # lavanflow-core: Pure Business Logic for LavanFlow OS
//!
//! Domain types and rules for the laundry/retail point of sale. Everything
//! here is deterministic and free of I/O; the document store, the mock
//! endpoint router and the workflow layer all build on these types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      LavanFlow OS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              lavanflow-workflow (Order Workflow)                │   │
//! │  │    save_order, generate_ncf ──► notifications + audit trail     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              lavanflow-db (Mock Endpoint Router)                │   │
//! │  │    /orders, /staff, /customers, /vouchers/burn, /system/...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ lavanflow-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │    ncf    │  │ validation│  │   │
//! │  │   │  Order    │  │   Money   │  │ NCF cursor│  │   rules   │  │   │
//! │  │   │  Voucher  │  │  RD$ fmt  │  │ formatting│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Order, Customer, VoucherRange, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`ncf`] - Fiscal receipt number (NCF) formatting and cursor rules
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use lavanflow_core::ncf::format_ncf;
//!
//! assert_eq!(format_ncf("B01", 7), "B0100000007");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod ncf;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Width of the zero-padded numeric part of an NCF.
pub const NCF_DIGITS: usize = 8;

/// Largest cursor that still fits in [`NCF_DIGITS`] digits.
pub const NCF_MAX_CURSOR: u64 = 10u64.pow(NCF_DIGITS as u32) - 1;

/// Upper bound for a single order total: RD$ 1,000,000,000.00.
pub const MAX_ORDER_TOTAL_CENTS: i64 = 100_000_000_000;

/// Number of shelf rows (`A`..`D`) a completed order can be parked in.
pub const SHELF_ROWS: u8 = 4;

/// Highest slot number within a shelf row (slots are `1..=50`).
pub const SHELF_SLOTS: u8 = 50;

/// Currency prefix used in customer-facing texts.
pub const CURRENCY_SYMBOL: &str = "RD$";
