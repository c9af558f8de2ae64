//! Integration tests for the search endpoint.
//!
//! Drives the full router (throttle, timeout and trace layers included)
//! against the in-memory directory.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use employee_directory::adapters::http::{app_router, DirectoryAppState, RateLimitState};
use employee_directory::adapters::{
    FixedWindowRateLimiter, InMemoryCounterStore, InMemoryEmployeeDirectory,
};
use employee_directory::config::RateLimitConfig;
use employee_directory::domain::directory::{
    ColumnVisibility, EmployeeField, EmployeeRecord, EmployeeStatus, Facet,
};
use employee_directory::domain::foundation::{EmployeeId, OrganizationId};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn employee(id: i64, org: i64) -> EmployeeRecord {
    EmployeeRecord::new(EmployeeId::new(id), OrganizationId::new(org))
}

/// Tenant 1: Alice (Hà Nội, ACTIVE) and Bob (Đà Nẵng, INACTIVE), both at
/// TechCorp; tenant 2: Carol, also in Hà Nội.
async fn seeded_directory() -> InMemoryEmployeeDirectory {
    let directory = InMemoryEmployeeDirectory::new();
    directory
        .insert_all([
            employee(1, 1)
                .with_name("Alice", "Nguyen")
                .with_contact_info("alice@example.com")
                .with_facet(Facet::Location, "Hà Nội")
                .with_facet(Facet::Company, "TechCorp")
                .with_facet(Facet::Department, "Engineering")
                .with_facet(Facet::Position, "Backend Developer")
                .with_status(EmployeeStatus::Active),
            employee(2, 1)
                .with_name("Bob", "Tran")
                .with_contact_info("bob@example.com")
                .with_facet(Facet::Location, "Đà Nẵng")
                .with_facet(Facet::Company, "TechCorp")
                .with_facet(Facet::Department, "Engineering")
                .with_facet(Facet::Position, "Frontend Developer")
                .with_status(EmployeeStatus::Inactive),
            employee(3, 2)
                .with_name("Carol", "Le")
                .with_contact_info("carol@example.com")
                .with_facet(Facet::Location, "Hà Nội")
                .with_facet(Facet::Company, "OtherCorp"),
        ])
        .await;

    directory
        .set_visible_columns(
            OrganizationId::new(1),
            ColumnVisibility::new([EmployeeField::FirstName, EmployeeField::Position]),
        )
        .await;
    directory
        .set_visible_columns(
            OrganizationId::new(2),
            ColumnVisibility::new([EmployeeField::Id, EmployeeField::ContactInfo]),
        )
        .await;

    directory
}

fn app_with(directory: InMemoryEmployeeDirectory) -> Router {
    let config = RateLimitConfig {
        requests_per_window: 1_000,
        ..Default::default()
    };
    let limiter =
        FixedWindowRateLimiter::from_config(Arc::new(InMemoryCounterStore::new()), &config);

    app_router(
        DirectoryAppState::new(Arc::new(directory.clone()), Arc::new(directory)),
        RateLimitState::new(Arc::new(limiter), &config),
        Duration::from_secs(30),
    )
}

async fn app() -> Router {
    app_with(seeded_directory().await)
}

fn search_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/search")
        .header("content-type", "application/json")
        .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 50000))))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn post_search(app: &Router, body: Value) -> (StatusCode, Value) {
    post_raw(app, &body.to_string()).await
}

async fn post_raw(app: &Router, body: &str) -> (StatusCode, Value) {
    let response = app.clone().oneshot(search_request(body)).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn first_names(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["first_name"].as_str().unwrap_or_default().to_string())
        .collect()
}

// =============================================================================
// Search Semantics
// =============================================================================

#[tokio::test]
async fn location_filter_returns_only_alice() {
    let app = app().await;

    let (status, body) = post_search(
        &app,
        json!({ "organization_id": 1, "locations": ["ha noi"], "page": 1, "page_size": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 10);
    assert_eq!(
        body["results"],
        json!([{ "first_name": "Alice", "position": "Backend Developer" }])
    );
}

#[tokio::test]
async fn unmatched_location_returns_empty_page() {
    let app = app().await;

    let (status, body) =
        post_search(&app, json!({ "organization_id": 1, "locations": ["tokyo"] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn accents_and_case_are_ignored_in_filters() {
    let app = app().await;

    for location in ["Hà Nội", "HA NOI", "ha   noi "] {
        let (_, body) =
            post_search(&app, json!({ "organization_id": 1, "locations": [location] })).await;
        assert_eq!(first_names(&body), vec!["Alice"], "filter {:?}", location);
    }
}

#[tokio::test]
async fn values_within_a_facet_are_alternatives() {
    let app = app().await;

    let (_, body) = post_search(
        &app,
        json!({ "organization_id": 1, "locations": ["ha noi", "tokyo"] }),
    )
    .await;
    assert_eq!(first_names(&body), vec!["Alice"]);

    let (_, body) = post_search(
        &app,
        json!({ "organization_id": 1, "locations": ["ha noi", "da nang"] }),
    )
    .await;
    assert_eq!(first_names(&body), vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn facets_are_combined_with_and() {
    let app = app().await;

    let (_, body) = post_search(
        &app,
        json!({ "organization_id": 1, "locations": ["ha noi", "tokyo"], "companies": ["other"] }),
    )
    .await;

    assert_eq!(body["total"], 0);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn status_filter_selects_members() {
    let app = app().await;

    let (_, body) =
        post_search(&app, json!({ "organization_id": 1, "statuses": ["INACTIVE"] })).await;
    assert_eq!(first_names(&body), vec!["Bob"]);

    let (_, body) = post_search(
        &app,
        json!({ "organization_id": 1, "statuses": ["ACTIVE", "INACTIVE"] }),
    )
    .await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn tenants_never_see_each_other() {
    let app = app().await;

    let (_, body) =
        post_search(&app, json!({ "organization_id": 2, "locations": ["ha noi"] })).await;
    assert_eq!(body["total"], 1);
    assert_eq!(
        body["results"],
        json!([{ "id": 3, "contact_info": "carol@example.com" }])
    );

    let (_, body) = post_search(&app, json!({ "organization_id": 99 })).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn hidden_columns_are_never_projected() {
    let app = app().await;

    let (_, body) = post_search(&app, json!({ "organization_id": 1 })).await;
    for result in body["results"].as_array().unwrap() {
        let keys: Vec<&String> = result.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["first_name", "position"]);
        assert!(result.get("contact_info").is_none());
    }
}

#[tokio::test]
async fn tenant_without_visible_columns_gets_empty_mappings() {
    let directory = seeded_directory().await;
    directory
        .set_visible_columns(OrganizationId::new(1), ColumnVisibility::default())
        .await;
    let app = app_with(directory);

    let (status, body) = post_search(&app, json!({ "organization_id": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["results"], json!([{}, {}]));
}

#[tokio::test]
async fn second_page_of_size_one_is_the_second_record() {
    let app = app().await;

    let (_, body) = post_search(
        &app,
        json!({ "organization_id": 1, "companies": ["TECHCORP"], "page": 2, "page_size": 1 }),
    )
    .await;

    assert_eq!(body["total"], 2);
    assert_eq!(body["page"], 2);
    assert_eq!(body["page_size"], 1);
    assert_eq!(first_names(&body), vec!["Bob"]);
}

#[tokio::test]
async fn defaults_are_first_page_of_fifty() {
    let app = app().await;

    let (_, body) = post_search(&app, json!({ "organization_id": 1 })).await;
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 50);
}

// =============================================================================
// Boundary Validation
// =============================================================================

#[tokio::test]
async fn unknown_status_is_422() {
    let app = app().await;

    let (status, body) =
        post_search(&app, json!({ "organization_id": 1, "statuses": ["RETIRED"] })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "statuses");
}

#[tokio::test]
async fn non_positive_pagination_is_422() {
    let app = app().await;

    for body in [
        json!({ "organization_id": 1, "page": 0 }),
        json!({ "organization_id": 1, "page_size": 0 }),
        json!({ "organization_id": 1, "page": -1 }),
    ] {
        let (status, _) = post_search(&app, body.clone()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {}", body);
    }
}

#[tokio::test]
async fn malformed_or_incomplete_body_is_422() {
    let app = app().await;

    let (status, body) = post_raw(&app, "{not json").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_REQUEST_BODY");

    let (status, _) = post_search(&app, json!({ "locations": ["ha noi"] })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unavailable_store_is_503() {
    let directory = seeded_directory().await;
    directory.set_unavailable(true);
    let app = app_with(directory);

    let (status, body) = post_search(&app, json!({ "organization_id": 1 })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "STORE_UNAVAILABLE");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 50000))))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "ok", "message": "Service is healthy" }));
}
