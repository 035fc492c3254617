//! End-to-end calls through `MockApi`, backed by a real document file.

use std::sync::Arc;
use std::time::Duration;

use lavanflow_core::{AnalyticsSummary, Customer, Money, Order, VoucherRange};
use lavanflow_db::{
    DocumentStore, ErrorCode, MockApi, SequentialIds, StoreConfig, COMMUNICATION_FAILURE,
};
use serde_json::{json, Value};
use tempfile::TempDir;

async fn file_api() -> (TempDir, MockApi) {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path().join("lavanflow_db.json")).latency(Duration::ZERO);
    let store = DocumentStore::open(&config).await.unwrap();
    (dir, MockApi::new(store, Arc::new(SequentialIds::new()), Duration::ZERO))
}

fn order_body(customer: &str, total: i64) -> Value {
    json!({
        "customerId": "c-1",
        "customerName": customer,
        "branchId": "br-1",
        "items": [{"garmentId": "g-1", "name": "Shirt", "quantity": 1, "unitPrice": total}],
        "total": total,
        "status": "Received"
    })
}

#[tokio::test]
async fn burns_are_sequential_and_persisted() {
    let (dir, api) = file_api().await;
    let burn = json!({"type": "Final Consumer (B02)", "branchId": "br-2"});

    let mut issued = Vec::new();
    for _ in 0..5 {
        issued.push(api.post("/vouchers/burn", burn.clone()).await.unwrap());
    }
    assert_eq!(
        issued,
        vec![
            json!("B0200000001"),
            json!("B0200000002"),
            json!("B0200000003"),
            json!("B0200000004"),
            json!("B0200000005"),
        ]
    );

    // Reopen from disk; the cursor must have been committed.
    drop(api);
    let config = StoreConfig::new(dir.path().join("lavanflow_db.json")).latency(Duration::ZERO);
    let api = MockApi::open(&config).await.unwrap();
    let next = api.post("/vouchers/burn", burn).await.unwrap();
    assert_eq!(next, json!("B0200000006"));
}

#[tokio::test]
async fn burn_without_matching_range_is_empty() {
    let (_dir, api) = file_api().await;

    let ncf = api
        .post("/vouchers/burn", json!({"type": "Tax Credit (B01)", "branchId": "br-404"}))
        .await
        .unwrap();
    assert_eq!(ncf, json!(""));

    let ranges: Vec<VoucherRange> = serde_json::from_value(api.get("/vouchers").await.unwrap()).unwrap();
    assert!(ranges.iter().all(|r| r.current == 1));
}

#[tokio::test]
async fn concurrent_burns_never_repeat() {
    let (_dir, api) = file_api().await;
    let api = Arc::new(api);

    let mut handles = Vec::new();
    for _ in 0..20 {
        let api = Arc::clone(&api);
        handles.push(tokio::spawn(async move {
            api.post(
                "/vouchers/burn",
                json!({"type": "Tax Credit (B01)", "branchId": "br-1"}),
            )
            .await
            .unwrap()
        }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
        numbers.push(handle.await.unwrap().as_str().unwrap().to_string());
    }
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), 20);
    assert_eq!(numbers.last().map(String::as_str), Some("B0100000020"));
}

#[tokio::test]
async fn orders_flow_through_summary() {
    let (_dir, api) = file_api().await;

    let first: Order = serde_json::from_value(
        api.post("/orders", order_body("María Rodríguez", 300_00)).await.unwrap(),
    )
    .unwrap();
    let second: Order = serde_json::from_value(
        api.post("/orders", order_body("José Pérez", 150_50)).await.unwrap(),
    )
    .unwrap();
    assert_ne!(first.id, second.id);

    let completed: Order = serde_json::from_value(
        api.patch(&format!("/orders/{}/status", first.id), json!({"status": "Completed"}))
            .await
            .unwrap(),
    )
    .unwrap();
    let shelf = completed.location.clone().unwrap();

    // A second completion through the POST alias keeps the original shelf.
    let again: Order = serde_json::from_value(
        api.post(&format!("/orders/{}/status", first.id), json!({"status": "Completed"}))
            .await
            .unwrap(),
    )
    .unwrap();
    assert_eq!(again.location, Some(shelf));

    let listed: Vec<Order> = serde_json::from_value(api.get("/orders").await.unwrap()).unwrap();
    assert_eq!(listed[0].id, second.id);

    let only_completed: Vec<Order> =
        serde_json::from_value(api.get("/orders?status=Completed").await.unwrap()).unwrap();
    assert_eq!(only_completed.len(), 1);

    let summary: AnalyticsSummary =
        serde_json::from_value(api.get("/orders/analytics/summary").await.unwrap()).unwrap();
    assert_eq!(summary.order_count(), listed.len() as u64);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.received, 1);
    assert_eq!(summary.revenue.cents(), 450_50);
}

#[tokio::test]
async fn customers_get_distinct_codes() {
    let (_dir, api) = file_api().await;

    let a: Customer = serde_json::from_value(
        api.post("/customers", json!({"name": "Luis Gómez", "phone": "809-555-7777"}))
            .await
            .unwrap(),
    )
    .unwrap();
    let b: Customer = serde_json::from_value(
        api.post("/customers", json!({"name": "Rosa Díaz", "phone": "809-555-8888"}))
            .await
            .unwrap(),
    )
    .unwrap();

    for code in [&a.code, &b.code] {
        assert!(code.starts_with("CUST-"));
        assert_eq!(code.len(), 9);
        assert!(code[5..].chars().all(|c| c.is_ascii_digit()));
    }
    assert_ne!(a.code, b.code);

    let found: Vec<Customer> =
        serde_json::from_value(api.get("/customers?search=ROSA").await.unwrap()).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, b.id);
}

#[tokio::test]
async fn clearing_audit_logs_leaves_nothing() {
    let (_dir, api) = file_api().await;

    api.post(
        "/audit-logs",
        json!({
            "userId": "u-admin-1",
            "userName": "Admin",
            "action": "NCF_BURN",
            "description": "Burned NCF sequence B0100000001 for type Tax Credit (B01)",
            "details": {"ncf": "B0100000001", "type": "Tax Credit (B01)"}
        }),
    )
    .await
    .unwrap();
    assert_eq!(api.get("/audit-logs").await.unwrap().as_array().unwrap().len(), 1);

    assert_eq!(api.delete("/audit-logs").await.unwrap(), json!({"success": true}));
    assert_eq!(api.get("/audit-logs").await.unwrap(), json!([]));
}

#[tokio::test]
async fn staff_lifecycle() {
    let (_dir, api) = file_api().await;

    let created = api
        .post(
            "/staff",
            json!({
                "username": "Carla",
                "role": "Cashier",
                "branchId": "br-2",
                "schedule": {"days": ["Mon", "Tue"], "startTime": "09:00", "endTime": "17:00"}
            }),
        )
        .await
        .unwrap();
    assert_eq!(created["isActive"], json!(true));
    let id = created["id"].as_str().unwrap().to_string();

    let br2 = api.get("/staff/active?branchId=br-2").await.unwrap();
    assert_eq!(br2.as_array().unwrap().len(), 1);

    assert_eq!(
        api.delete(&format!("/staff/{}", id)).await.unwrap(),
        json!({"success": true})
    );
    assert_eq!(api.get("/staff").await.unwrap().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn system_endpoints() {
    let (_dir, api) = file_api().await;

    let health = api.get("/system/health").await.unwrap();
    assert_eq!(health["database"], json!("ONLINE"));
    assert_eq!(health["syncQueue"], json!(0));

    let backup = api.post("/system/backup/trigger", json!({})).await.unwrap();
    assert_eq!(backup["type"], json!("MANUAL"));
    assert_eq!(backup["status"], json!("SUCCESS"));

    let history = api.get("/system/backup/history").await.unwrap();
    assert_eq!(history[0]["id"], backup["id"]);
}

#[tokio::test]
async fn failures_are_opaque() {
    let (_dir, api) = file_api().await;

    let missing_route = api.get("/payments").await.unwrap_err();
    assert_eq!(missing_route.code, ErrorCode::NotFound);
    assert_eq!(missing_route.message, COMMUNICATION_FAILURE);

    let missing_order = api
        .patch("/orders/nope/status", json!({"status": "Delivered"}))
        .await
        .unwrap_err();
    assert_eq!(missing_order.code, ErrorCode::NotFound);
    assert_eq!(missing_order.message, COMMUNICATION_FAILURE);

    let bad_body = api.post("/orders", json!({"total": "lots"})).await.unwrap_err();
    assert_eq!(bad_body.code, ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn voucher_ranges_past_eight_digits_are_refused() {
    let (_dir, api) = file_api().await;

    let err = api
        .post(
            "/vouchers",
            json!({
                "type": "Tax Credit (B01)",
                "prefix": "B01",
                "start": 99_999_999u64,
                "end": 100_000_001u64,
                "branchId": "br-9"
            }),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidRequest);

    api.post(
        "/vouchers",
        json!({
            "type": "Tax Credit (B01)",
            "prefix": "B01",
            "start": 99_999_998u64,
            "end": 99_999_999u64,
            "branchId": "br-9"
        }),
    )
    .await
    .unwrap();

    let burn = json!({"type": "Tax Credit (B01)", "branchId": "br-9"});
    let mut issued = Vec::new();
    for _ in 0..3 {
        issued.push(api.post("/vouchers/burn", burn.clone()).await.unwrap());
    }
    assert_eq!(issued, vec![json!("B0199999998"), json!("B0199999999"), json!("")]);
}

#[tokio::test]
async fn revenue_overflow_surfaces_as_opaque_failure() {
    let (_dir, api) = file_api().await;
    let order: Order = serde_json::from_value(
        api.post("/orders", order_body("María Rodríguez", 100_00)).await.unwrap(),
    )
    .unwrap();

    api.store()
        .write(|doc| {
            for id in ["o-big-1", "o-big-2"] {
                let mut big = order.clone();
                big.id = id.to_string();
                big.total = Money::from_cents(i64::MAX / 2 + 1);
                doc.orders.push(big);
            }
            Ok(())
        })
        .await
        .unwrap();

    let err = api.get("/orders/analytics/summary").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StorageFailure);
    assert_eq!(err.message, COMMUNICATION_FAILURE);
}

#[tokio::test]
async fn oversized_order_total_is_rejected() {
    let (_dir, api) = file_api().await;

    let err = api
        .post("/orders", order_body("José Pérez", i64::MAX / 2 + 1))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidRequest);
    assert_eq!(api.get("/orders").await.unwrap(), json!([]));
}

#[tokio::test(start_paused = true)]
async fn latency_is_applied() {
    let api = MockApi::open(&StoreConfig::in_memory().latency(Duration::from_millis(400)))
        .await
        .unwrap();

    let started = tokio::time::Instant::now();
    api.get("/branches").await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(400));
}
