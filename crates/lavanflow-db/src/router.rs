//! # Mock Endpoint Router
//!
//! Answers REST-style calls (`GET /orders?status=Completed`,
//! `POST /vouchers/burn`, ...) straight from the document store, so the
//! rest of the system can talk to "the backend" without a server.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MockApi::call                                    │
//! │                                                                         │
//! │  (Method, "/orders/o-1/status", Some({"status": "Completed"}))         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sleep(latency)                  ← simulated network round trip        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Route::resolve()                ← closed enum, typed body             │
//! │       │   unknown verb/path ──► DbError::RouteNotFound                 │
//! │       ▼                                                                 │
//! │  store.read(..) | store.write(..) ← one locked transaction             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(serde_json::Value)                                                 │
//! │  Err(DbError) ──► error! log ──► ApiError (opaque message + code)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Endpoints
//!
//! | Verb        | Path                          | Handler                      |
//! |-------------|-------------------------------|------------------------------|
//! | GET         | `/orders?status=`             | list orders                  |
//! | POST        | `/orders`                     | create order                 |
//! | PATCH, POST | `/orders/{id}/status`         | change status                |
//! | GET         | `/orders/analytics/summary`   | counts + revenue             |
//! | GET         | `/staff`                      | list staff                   |
//! | GET         | `/staff/active?branchId=`     | roster by branch             |
//! | POST        | `/staff`                      | add staff member             |
//! | DELETE      | `/staff/{id}`                 | remove staff member          |
//! | GET         | `/customers?search=`          | search customers             |
//! | POST        | `/customers`                  | register customer            |
//! | GET         | `/branches`                   | branches                     |
//! | GET         | `/inventory`                  | garment catalog              |
//! | GET         | `/vouchers`                   | voucher ranges               |
//! | POST        | `/vouchers`                   | register voucher range       |
//! | POST        | `/vouchers/burn`              | issue next NCF               |
//! | GET         | `/audit-logs`                 | audit trail                  |
//! | POST        | `/audit-logs`                 | append audit entry           |
//! | DELETE      | `/audit-logs`                 | clear audit trail            |
//! | GET         | `/system/health`              | synthesized health           |
//! | GET         | `/system/backup/history`      | backup records               |
//! | POST        | `/system/backup/trigger`      | record a backup              |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use lavanflow_core::{
    Ack, BurnRequest, NewAuditLogEntry, NewCustomer, NewOrder, NewStaffMember, NewVoucherRange,
    StatusChange,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{ApiError, ApiResult, DbError, DbResult};
use crate::ids::{IdGenerator, RandomIds};
use crate::repository::{
    catalog, AuditRepository, CustomerRepository, OrderRepository, StaffRepository,
    SystemRepository, VoucherRepository,
};
use crate::store::{DocumentStore, StoreConfig};

// =============================================================================
// Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(DbError::InvalidBody(format!("unsupported method '{}'", other))),
        }
    }
}

// =============================================================================
// Route
// =============================================================================

/// Every endpoint the mock backend answers, with its decoded parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    ListOrders { status: Option<String> },
    CreateOrder(NewOrder),
    UpdateOrderStatus { id: String, change: StatusChange },
    OrdersSummary,
    ListStaff,
    ListActiveStaff { branch_id: Option<String> },
    CreateStaff(NewStaffMember),
    DeleteStaff { id: String },
    ListCustomers { search: Option<String> },
    CreateCustomer(NewCustomer),
    ListBranches,
    ListInventory,
    ListVouchers,
    CreateVoucherRange(NewVoucherRange),
    BurnVoucher(BurnRequest),
    ListAuditLogs,
    AppendAuditLog(NewAuditLogEntry),
    ClearAuditLogs,
    SystemHealth,
    BackupHistory,
    TriggerBackup,
}

impl Route {
    /// Maps a verb, endpoint (path plus optional query) and body to a route.
    pub fn resolve(method: Method, endpoint: &str, body: Option<Value>) -> DbResult<Route> {
        let (path, query) = match endpoint.split_once('?') {
            Some((path, query)) => (path, query),
            None => (endpoint, ""),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match (method, segments.as_slice()) {
            (Method::Get, ["orders"]) => Route::ListOrders {
                status: query_param(query, "status"),
            },
            (Method::Post, ["orders"]) => Route::CreateOrder(parse_body(body)?),
            (Method::Patch | Method::Post, ["orders", id, "status"]) => Route::UpdateOrderStatus {
                id: id.to_string(),
                change: parse_body(body)?,
            },
            (Method::Get, ["orders", "analytics", "summary"]) => Route::OrdersSummary,

            (Method::Get, ["staff"]) => Route::ListStaff,
            (Method::Get, ["staff", "active"]) => Route::ListActiveStaff {
                branch_id: query_param(query, "branchId"),
            },
            (Method::Post, ["staff"]) => Route::CreateStaff(parse_body(body)?),
            (Method::Delete, ["staff", id]) => Route::DeleteStaff { id: id.to_string() },

            (Method::Get, ["customers"]) => Route::ListCustomers {
                search: query_param(query, "search"),
            },
            (Method::Post, ["customers"]) => Route::CreateCustomer(parse_body(body)?),

            (Method::Get, ["branches"]) => Route::ListBranches,
            (Method::Get, ["inventory"]) => Route::ListInventory,

            (Method::Get, ["vouchers"]) => Route::ListVouchers,
            (Method::Post, ["vouchers"]) => Route::CreateVoucherRange(parse_body(body)?),
            (Method::Post, ["vouchers", "burn"]) => Route::BurnVoucher(parse_body(body)?),

            (Method::Get, ["audit-logs"]) => Route::ListAuditLogs,
            (Method::Post, ["audit-logs"]) => Route::AppendAuditLog(parse_body(body)?),
            (Method::Delete, ["audit-logs"]) => Route::ClearAuditLogs,

            (Method::Get, ["system", "health"]) => Route::SystemHealth,
            (Method::Get, ["system", "backup", "history"]) => Route::BackupHistory,
            (Method::Post, ["system", "backup", "trigger"]) => Route::TriggerBackup,

            _ => {
                return Err(DbError::RouteNotFound {
                    method: method.to_string(),
                    endpoint: endpoint.to_string(),
                })
            }
        };

        Ok(route)
    }

    /// Whether handling this route changes the document.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Route::ListOrders { .. }
                | Route::OrdersSummary
                | Route::ListStaff
                | Route::ListActiveStaff { .. }
                | Route::ListCustomers { .. }
                | Route::ListBranches
                | Route::ListInventory
                | Route::ListVouchers
                | Route::ListAuditLogs
                | Route::SystemHealth
                | Route::BackupHistory
        )
    }
}

/// First value of `key` in a query string; empty values count as absent.
fn query_param(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

fn parse_body<T: DeserializeOwned>(body: Option<Value>) -> DbResult<T> {
    let body = body.ok_or_else(|| DbError::InvalidBody("missing request body".to_string()))?;
    serde_json::from_value(body).map_err(|e| DbError::InvalidBody(e.to_string()))
}

fn to_json<T: Serialize>(value: T) -> DbResult<Value> {
    serde_json::to_value(value).map_err(|e| DbError::Serialization(e.to_string()))
}

// =============================================================================
// MockApi
// =============================================================================

/// The mock backend: a document store behind a fixed endpoint table.
///
/// ## Usage
/// ```rust,ignore
/// let api = MockApi::open(&StoreConfig::from_env()?).await?;
///
/// let ncf = api
///     .post("/vouchers/burn", json!({"type": "Tax Credit (B01)", "branchId": "br-1"}))
///     .await?;
/// ```
pub struct MockApi {
    store: DocumentStore,
    ids: Arc<dyn IdGenerator>,
    latency: Duration,
}

impl fmt::Debug for MockApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockApi")
            .field("store", &self.store)
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl MockApi {
    /// Opens (and seeds if needed) the store described by `config`.
    pub async fn open(config: &StoreConfig) -> DbResult<Self> {
        let store = DocumentStore::open(config).await?;
        Ok(MockApi::new(store, Arc::new(RandomIds), config.latency))
    }

    pub fn new(store: DocumentStore, ids: Arc<dyn IdGenerator>, latency: Duration) -> Self {
        MockApi { store, ids, latency }
    }

    /// Replaces the identifier source.
    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Handles one call. Failures carry only the opaque communication message.
    pub async fn call(&self, method: Method, endpoint: &str, body: Option<Value>) -> ApiResult<Value> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.handle(method, endpoint, body).await {
            Ok(value) => Ok(value),
            Err(err) => {
                match &err {
                    DbError::RouteNotFound { .. } => {
                        warn!(%method, endpoint, "API Error: {}", err)
                    }
                    _ => error!(%method, endpoint, "API Error: {}", err),
                }
                Err(ApiError::from(&err))
            }
        }
    }

    pub async fn get(&self, endpoint: &str) -> ApiResult<Value> {
        self.call(Method::Get, endpoint, None).await
    }

    pub async fn post(&self, endpoint: &str, body: Value) -> ApiResult<Value> {
        self.call(Method::Post, endpoint, Some(body)).await
    }

    pub async fn patch(&self, endpoint: &str, body: Value) -> ApiResult<Value> {
        self.call(Method::Patch, endpoint, Some(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> ApiResult<Value> {
        self.call(Method::Delete, endpoint, None).await
    }

    async fn handle(&self, method: Method, endpoint: &str, body: Option<Value>) -> DbResult<Value> {
        let route = Route::resolve(method, endpoint, body)?;
        debug!(%method, endpoint, mutating = route.is_mutating(), "Dispatching");

        if route.is_mutating() {
            self.store.write(|doc| self.apply(route, doc)).await
        } else {
            self.store.read(|doc| self.query(route, doc)).await
        }
    }

    fn query(&self, route: Route, doc: &crate::document::Document) -> DbResult<Value> {
        let ids = self.ids.as_ref();
        match route {
            Route::ListOrders { status } => {
                to_json(OrderRepository::new(ids).list(doc, status.as_deref()))
            }
            Route::OrdersSummary => to_json(OrderRepository::new(ids).summary(doc)?),
            Route::ListStaff => to_json(StaffRepository::new(ids).list(doc)),
            Route::ListActiveStaff { branch_id } => {
                to_json(StaffRepository::new(ids).list_for_branch(doc, branch_id.as_deref()))
            }
            Route::ListCustomers { search } => {
                to_json(CustomerRepository::new(ids).search(doc, search.as_deref())?)
            }
            Route::ListBranches => to_json(catalog::branches(doc)),
            Route::ListInventory => to_json(catalog::inventory(doc)),
            Route::ListVouchers => to_json(VoucherRepository::new(ids).list(doc)),
            Route::ListAuditLogs => to_json(AuditRepository::new(ids).list(doc)),
            Route::SystemHealth => to_json(SystemRepository::new(ids).health()),
            Route::BackupHistory => to_json(SystemRepository::new(ids).backup_history(doc)),
            other => Err(DbError::InvalidBody(format!(
                "{:?} cannot be served read-only",
                other
            ))),
        }
    }

    fn apply(&self, route: Route, doc: &mut crate::document::Document) -> DbResult<Value> {
        let ids = self.ids.as_ref();
        match route {
            Route::CreateOrder(new_order) => to_json(OrderRepository::new(ids).create(doc, new_order)?),
            Route::UpdateOrderStatus { id, change } => {
                to_json(OrderRepository::new(ids).update_status(doc, &id, change.status)?)
            }
            Route::CreateStaff(new_staff) => to_json(StaffRepository::new(ids).create(doc, new_staff)?),
            Route::DeleteStaff { id } => {
                StaffRepository::new(ids).delete(doc, &id);
                to_json(Ack::ok())
            }
            Route::CreateCustomer(new_customer) => {
                to_json(CustomerRepository::new(ids).create(doc, new_customer)?)
            }
            Route::CreateVoucherRange(new_range) => {
                to_json(VoucherRepository::new(ids).create(doc, new_range)?)
            }
            Route::BurnVoucher(request) => to_json(VoucherRepository::new(ids).burn(
                doc,
                request.receipt_type,
                &request.branch_id,
            )?),
            Route::AppendAuditLog(entry) => to_json(AuditRepository::new(ids).append(doc, entry)),
            Route::ClearAuditLogs => {
                AuditRepository::new(ids).clear(doc);
                to_json(Ack::ok())
            }
            Route::TriggerBackup => to_json(SystemRepository::new(ids).trigger_backup(doc)),
            other => self.query(other, doc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_query_filters() {
        let route = Route::resolve(Method::Get, "/orders?status=In%20Process", None).unwrap();
        assert_eq!(
            route,
            Route::ListOrders {
                status: Some("In Process".to_string())
            }
        );

        let route = Route::resolve(Method::Get, "/customers?search=", None).unwrap();
        assert_eq!(route, Route::ListCustomers { search: None });
    }

    #[test]
    fn test_resolve_status_update_accepts_patch_and_post() {
        for method in [Method::Patch, Method::Post] {
            let route =
                Route::resolve(method, "/orders/o-1/status", Some(json!({"status": "Completed"})))
                    .unwrap();
            assert!(matches!(route, Route::UpdateOrderStatus { ref id, .. } if id == "o-1"));
        }
    }

    #[test]
    fn test_resolve_staff_active_before_delete() {
        assert!(matches!(
            Route::resolve(Method::Get, "/staff/active?branchId=br-1", None).unwrap(),
            Route::ListActiveStaff { branch_id: Some(_) }
        ));
        assert!(matches!(
            Route::resolve(Method::Delete, "/staff/active", None).unwrap(),
            Route::DeleteStaff { .. }
        ));
    }

    #[test]
    fn test_resolve_unknown_route() {
        let err = Route::resolve(Method::Delete, "/orders", None).unwrap_err();
        assert!(matches!(err, DbError::RouteNotFound { .. }));

        let err = Route::resolve(Method::Get, "/payments", None).unwrap_err();
        assert!(matches!(err, DbError::RouteNotFound { .. }));
    }

    #[test]
    fn test_resolve_rejects_missing_body() {
        let err = Route::resolve(Method::Post, "/vouchers/burn", None).unwrap_err();
        assert!(matches!(err, DbError::InvalidBody(_)));
    }

    #[test]
    fn test_reads_are_not_mutating() {
        assert!(!Route::SystemHealth.is_mutating());
        assert!(Route::TriggerBackup.is_mutating());
        assert!(Route::ClearAuditLogs.is_mutating());
    }

    #[test]
    fn test_method_parse() {
        assert_eq!("patch".parse::<Method>().unwrap(), Method::Patch);
        assert!("PUT".parse::<Method>().is_err());
    }
}
