//! # lavanflow-db: Document Store & Mock API for LavanFlow OS
//!
//! The whole data set lives in one JSON document. This crate loads it,
//! routes REST-style calls to per-resource handlers and persists changes,
//! one locked transaction per call.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LavanFlow Data Flow                              │
//! │                                                                         │
//! │  OrderService::save_order / generate_ncf                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   lavanflow-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   MockApi     │    │  Repositories │    │ DocumentStore│  │   │
//! │  │   │  (router.rs)  │    │               │    │  (store.rs)  │  │   │
//! │  │   │               │    │ OrderRepo     │    │              │  │   │
//! │  │   │ Route enum    │───►│ VoucherRepo   │◄───│ Mutex + load │  │   │
//! │  │   │ latency       │    │ CustomerRepo  │    │ /save cycle  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     lavanflow_db.json                           │   │
//! │  │   ~/.local/share/lavanflow-os/lavanflow_db.json                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store configuration and the transactional document handle
//! - [`storage`] - File and in-memory backends
//! - [`document`] - The persisted document shape
//! - [`seed`] - Default document for fresh installs
//! - [`router`] - Endpoint table and [`MockApi`]
//! - [`repository`] - Per-resource handlers (orders, vouchers, ...)
//! - [`ids`] - Injectable id/code generation
//! - [`error`] - Store and API error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lavanflow_db::{MockApi, StoreConfig};
//!
//! let api = MockApi::open(&StoreConfig::from_env()?).await?;
//!
//! let completed = api.get("/orders?status=Completed").await?;
//! let summary = api.get("/orders/analytics/summary").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod ids;
pub mod repository;
pub mod router;
pub mod seed;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use document::Document;
pub use error::{ApiError, ApiResult, DbError, DbResult, ErrorCode, COMMUNICATION_FAILURE};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use router::{Method, MockApi, Route};
pub use storage::{JsonFileStorage, MemoryStorage, StorageBackend};
pub use store::{DocumentStore, StorageLocation, StoreConfig};
