//! End-to-end tests for the roster engine HTTP API.
//!
//! This suite drives the full stack through the router:
//! - Site and guard registry
//! - Declarative shift reconciliation, including the attendance-conflict
//!   confirmation flow
//! - Guard reassignment between shift rows
//! - The attendance overview
//! - Invoice assembly under each GST regime
//! - Temporary slot copying and staffing requests
//! - Administrative user provisioning
//! - Change-feed notifications emitted by the store

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;
use uuid::Uuid;

use roster_engine::api::{create_router, AppState};
use roster_engine::config::ConfigLoader;
use roster_engine::feed::ChangeOp;
use roster_engine::models::{AttendanceRecord, AttendanceStatus, Shift, ShiftType};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let loader = ConfigLoader::load("./config").expect("Failed to load config");
    AppState::new(loader.company().clone())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn decimal_field(value: &Value, key: &str) -> Decimal {
    Decimal::from_str(value[key].as_str().unwrap()).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

fn site_body(name: &str, regime: &str) -> Value {
    json!({
        "name": name,
        "address": "1 Main St, Pune",
        "gst_regime": regime,
        "requirements": [{
            "role": "Security Guard",
            "day_slots": 4,
            "night_slots": 4,
            "budget_per_slot": "4300"
        }]
    })
}

async fn create_site(router: &Router, name: &str, regime: &str) -> Uuid {
    let (status, body) = post(router, "/sites", site_body(name, regime)).await;
    assert_eq!(status, StatusCode::CREATED);
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

async fn create_guard(router: &Router, name: &str, badge: &str) -> Uuid {
    let (status, body) = post(
        router,
        "/guards",
        json!({"name": name, "badge_number": badge, "monthly_pay": "14500"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

async fn reconcile(
    router: &Router,
    site_id: Uuid,
    shift_type: &str,
    guard_ids: &[Uuid],
    on: &str,
) -> (StatusCode, Value) {
    post(
        router,
        &format!("/sites/{}/shifts/reconcile", site_id),
        json!({"shift_type": shift_type, "guard_ids": guard_ids, "date": on}),
    )
    .await
}

// =============================================================================
// Allocation and attendance
// =============================================================================

#[tokio::test]
async fn test_allocation_lifecycle_with_overview() {
    let state = create_test_state();
    let router = create_router(state.clone());

    let site_id = create_site(&router, "Riverside Mill", "gst").await;
    let guard_a = create_guard(&router, "Ravi Patil", "B-0412").await;
    let guard_b = create_guard(&router, "Sunil More", "B-0413").await;

    let (status, report) =
        reconcile(&router, site_id, "day", &[guard_a, guard_b], "2026-03-14").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["added"].as_array().unwrap().len(), 2);

    // Nothing marked yet
    let (status, overview) = get(&router, "/attendance/overview?date=2026-03-14").await;
    assert_eq!(status, StatusCode::OK);
    let entry = &overview.as_array().unwrap()[0];
    assert_eq!(entry["slots"]["day"], 4);
    assert_eq!(entry["assigned"]["day"], 2);
    assert_eq!(entry["present"]["day"], 0);
    assert_eq!(entry["status"], "not-marked");

    // One of two guards marked present
    state
        .attendance()
        .create(AttendanceRecord::marked(
            date("2026-03-14"),
            site_id,
            ShiftType::Day,
            guard_a,
            AttendanceStatus::Present,
        ))
        .await
        .unwrap();
    let (_, overview) = get(&router, "/attendance/overview?date=2026-03-14").await;
    assert_eq!(overview[0]["status"], "partially-marked");

    // Both marked present
    state
        .attendance()
        .create(AttendanceRecord::marked(
            date("2026-03-14"),
            site_id,
            ShiftType::Day,
            guard_b,
            AttendanceStatus::Present,
        ))
        .await
        .unwrap();
    let (_, overview) = get(&router, "/attendance/overview?date=2026-03-14").await;
    assert_eq!(overview[0]["status"], "fully-marked");
}

#[tokio::test]
async fn test_conflict_blocks_until_confirmed() {
    let state = create_test_state();
    let router = create_router(state.clone());

    let site_id = create_site(&router, "Conflict Yard", "gst").await;
    let guard = create_guard(&router, "Ravi Patil", "B-0412").await;

    let (status, _) = reconcile(&router, site_id, "day", &[guard], "2026-03-14").await;
    assert_eq!(status, StatusCode::OK);

    state
        .attendance()
        .create(AttendanceRecord::marked(
            date("2026-03-14"),
            site_id,
            ShiftType::Day,
            guard,
            AttendanceStatus::Present,
        ))
        .await
        .unwrap();

    // Unconfirmed removal is rejected and the roster is untouched
    let (status, body) = reconcile(&router, site_id, "day", &[], "2026-03-14").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["conflicts"][0]["guard_id"], json!(guard.to_string()));
    let rows = state
        .shifts()
        .list_for_site(site_id, ShiftType::Day)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    // Confirmed removal deletes the attendance row and the shift
    let (status, report) = post(
        &router,
        &format!("/sites/{}/shifts/reconcile", site_id),
        json!({
            "shift_type": "day",
            "guard_ids": [],
            "date": "2026-03-14",
            "confirm_removal": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["attendance_deleted"], 1);
    let rows = state
        .shifts()
        .list_for_site(site_id, ShiftType::Day)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_reassign_swaps_guard_references() {
    let state = create_test_state();
    let router = create_router(state.clone());

    let site_id = create_site(&router, "Swap Site", "gst").await;
    let guard_a = create_guard(&router, "Ravi Patil", "B-0412").await;
    let guard_b = create_guard(&router, "Sunil More", "B-0413").await;

    reconcile(&router, site_id, "day", &[guard_a], "2026-03-14").await;
    reconcile(&router, site_id, "night", &[guard_b], "2026-03-14").await;

    let day_row = state
        .shifts()
        .list_for_site(site_id, ShiftType::Day)
        .await
        .unwrap()
        .remove(0);
    let night_row = state
        .shifts()
        .list_for_site(site_id, ShiftType::Night)
        .await
        .unwrap()
        .remove(0);

    let (status, body) = post(
        &router,
        "/shifts/reassign",
        json!({"shift_id_a": day_row.id, "shift_id_b": night_row.id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["guard_id"], json!(guard_b.to_string()));
    assert_eq!(body[1]["guard_id"], json!(guard_a.to_string()));
}

#[tokio::test]
async fn test_reassign_unknown_shift_returns_404() {
    let router = create_router(create_test_state());
    let (status, body) = post(
        &router,
        "/shifts/reassign",
        json!({"shift_id_a": Uuid::new_v4(), "shift_id_b": Uuid::new_v4()}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SHIFT_NOT_FOUND");
}

// =============================================================================
// Invoicing
// =============================================================================

async fn invoice_for(router: &Router, site_id: Uuid) -> Value {
    let (status, body) = post(
        router,
        &format!("/sites/{}/invoices", site_id),
        json!({"period_start": "2026-03-01", "period_end": "2026-03-31"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_invoice_gst_regime_splits_rate() {
    let router = create_router(create_test_state());
    let site_id = create_site(&router, "Intra-state Site", "gst").await;

    let invoice = invoice_for(&router, site_id).await;
    assert_eq!(decimal_field(&invoice, "subtotal"), decimal("34400"));
    assert_eq!(
        decimal_field(&invoice["tax"], "cgst_amount"),
        decimal("3096")
    );
    assert_eq!(
        decimal_field(&invoice["tax"], "sgst_amount"),
        decimal("3096")
    );
    assert_eq!(
        decimal_field(&invoice["tax"], "charged_tax"),
        decimal("6192")
    );
    assert_eq!(decimal_field(&invoice, "total"), decimal("40592"));
    assert_eq!(invoice["status"], "draft");
}

#[tokio::test]
async fn test_invoice_igst_regime_charges_full_rate() {
    let router = create_router(create_test_state());
    let site_id = create_site(&router, "Inter-state Site", "igst").await;

    let invoice = invoice_for(&router, site_id).await;
    assert_eq!(
        decimal_field(&invoice["tax"], "igst_amount"),
        decimal("6192")
    );
    assert_eq!(decimal_field(&invoice["tax"], "cgst_amount"), decimal("0"));
    assert_eq!(decimal_field(&invoice, "total"), decimal("40592"));
}

#[tokio::test]
async fn test_invoice_rcm_displays_tax_but_charges_none() {
    let router = create_router(create_test_state());
    let site_id = create_site(&router, "Reverse Charge Site", "rcm").await;

    let invoice = invoice_for(&router, site_id).await;
    // CGST/SGST are computed for display but the recipient pays them
    assert_eq!(
        decimal_field(&invoice["tax"], "cgst_amount"),
        decimal("3096")
    );
    assert_eq!(decimal_field(&invoice["tax"], "charged_tax"), decimal("0"));
    assert_eq!(decimal_field(&invoice, "total"), decimal("34400"));
}

#[tokio::test]
async fn test_invoice_ngst_charges_nothing() {
    let router = create_router(create_test_state());
    let site_id = create_site(&router, "No-tax Site", "ngst").await;

    let invoice = invoice_for(&router, site_id).await;
    assert_eq!(decimal_field(&invoice["tax"], "charged_tax"), decimal("0"));
    assert_eq!(decimal_field(&invoice["tax"], "cgst_amount"), decimal("0"));
    assert_eq!(decimal_field(&invoice, "total"), decimal("34400"));
}

#[tokio::test]
async fn test_invoice_personal_regime_uses_flat_rate() {
    let router = create_router(create_test_state());
    let site_id = create_site(&router, "Personal Site", "personal").await;

    let invoice = invoice_for(&router, site_id).await;
    assert_eq!(
        decimal_field(&invoice["tax"], "flat_amount"),
        decimal("6192")
    );
    assert_eq!(decimal_field(&invoice["tax"], "cgst_amount"), decimal("0"));
    assert_eq!(decimal_field(&invoice, "total"), decimal("40592"));
}

#[tokio::test]
async fn test_invoice_accepts_rate_override() {
    let router = create_router(create_test_state());
    let site_id = create_site(&router, "Override Site", "gst").await;

    let (status, invoice) = post(
        &router,
        &format!("/sites/{}/invoices", site_id),
        json!({
            "period_start": "2026-03-01",
            "period_end": "2026-03-31",
            "gst_rate": "12"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        decimal_field(&invoice["tax"], "cgst_amount"),
        decimal("2064")
    );
    assert_eq!(decimal_field(&invoice, "total"), decimal("38528"));
}

#[tokio::test]
async fn test_invoice_rejects_inverted_period() {
    let router = create_router(create_test_state());
    let site_id = create_site(&router, "Backwards Site", "gst").await;

    let (status, body) = post(
        &router,
        &format!("/sites/{}/invoices", site_id),
        json!({
            "period_start": "2026-03-31",
            "period_end": "2026-03-01"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Temporary staffing
// =============================================================================

#[tokio::test]
async fn test_copy_temporary_slots_between_dates() {
    let state = create_test_state();
    let router = create_router(state.clone());
    let site_id = create_site(&router, "Festival Grounds", "gst").await;

    for _ in 0..2 {
        state
            .shifts()
            .create(Shift::temporary(
                site_id,
                ShiftType::Day,
                "Security Guard".to_string(),
                decimal("850"),
                date("2026-03-14"),
            ))
            .await
            .unwrap();
    }

    let (status, body) = post(
        &router,
        &format!("/sites/{}/temporary-slots/copy", site_id),
        json!({"source_date": "2026-03-14", "target_date": "2026-03-15"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["copied"], 2);

    let copied = state
        .shifts()
        .list_temporary_for_date(site_id, date("2026-03-15"))
        .await
        .unwrap();
    assert_eq!(copied.len(), 2);
    assert!(copied.iter().all(|row| row.is_open()));
}

#[tokio::test]
async fn test_temporary_request_create_and_list() {
    let router = create_router(create_test_state());
    let site_id = create_site(&router, "Request Site", "gst").await;

    let (status, created) = post(
        &router,
        "/temporary-requests",
        json!({
            "site_id": site_id,
            "date": "2026-03-14",
            "role": "Gunman",
            "day_slots": 1,
            "night_slots": 2,
            "pay_rate": "950"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");

    let (status, listed) = get(&router, "/temporary-requests").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["role"], "Gunman");
}

// =============================================================================
// User provisioning
// =============================================================================

#[tokio::test]
async fn test_admin_user_provisioning() {
    let router = create_router(create_test_state());

    let (status, body) = post(
        &router,
        "/admin/users",
        json!({
            "name": "Asha Kulkarni",
            "email": "asha@example.com",
            "password": "secret123",
            "role": "supervisor"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "supervisor");

    let (status, body) = post(
        &router,
        "/admin/users",
        json!({
            "name": "",
            "email": "someone@example.com",
            "password": "secret123",
            "role": "admin"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Change feed
// =============================================================================

#[tokio::test]
async fn test_store_writes_reach_filtered_subscribers() {
    let state = create_test_state();
    let router = create_router(state.clone());

    let site_id = create_site(&router, "Watched Site", "gst").await;
    let other_site = create_site(&router, "Other Site", "gst").await;
    let guard = create_guard(&router, "Ravi Patil", "B-0412").await;

    let filter = format!("site_id=eq.{}", site_id);
    let mut rx = state.feed().subscribe("shifts", Some(&filter));

    reconcile(&router, other_site, "day", &[guard], "2026-03-14").await;
    reconcile(&router, site_id, "day", &[guard], "2026-03-14").await;

    // Only the watched site's insert comes through
    let event = rx.try_recv().unwrap();
    assert_eq!(event.table, "shifts");
    assert_eq!(event.op, ChangeOp::Insert);
    assert_eq!(event.site_id, Some(site_id));
    assert!(rx.try_recv().is_err());
}
