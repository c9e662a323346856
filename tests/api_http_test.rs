mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{seed_filament_with_stock, setup};

async fn app() -> (Router, printdesk_api::AppState) {
    let state = setup().await;
    (printdesk_api::app_router(state.clone()), state)
}

async fn body_json(body: Body) -> Value {
    let bytes = to_bytes(body, usize::MAX).await.expect("failed to read body");
    serde_json::from_slice(&bytes).expect("response was not JSON")
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

#[tokio::test]
async fn create_vendor_returns_201_with_row() {
    let (app, _state) = app().await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/vendors",
            json!({"name": "Prism Filaments", "email": "sales@prism.example"}),
        ))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["name"], "Prism Filaments");
    assert!(body["id"].as_i64().is_some());
}

#[tokio::test]
async fn validation_failure_returns_400_with_field_details() {
    let (app, _state) = app().await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/orders",
            json!({"total_amount": -5}),
        ))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"], "Validation failed");
    let details = body["details"].as_array().expect("details missing");
    assert!(details
        .iter()
        .any(|d| d["field"] == "customer_name"));
    assert!(details.iter().any(|d| d["field"] == "total_amount"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn missing_row_returns_404_envelope() {
    let (app, _state) = app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/orders/424242")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"], "Order 424242 not found");
}

#[tokio::test]
async fn insufficient_stock_returns_422() {
    let (app, state) = app().await;
    let filament_id = seed_filament_with_stock(&state, dec!(1000), dec!(1)).await;
    let order = state
        .orders
        .create(common::order_payload(dec!(500), dec!(0)))
        .await
        .expect("order create failed");

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/print-usage",
            json!({
                "order_id": order.id,
                "filament_id": filament_id,
                "quantity_used_kg": 3
            }),
        ))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"], "Insufficient stock. Available: 1 kg");
}

#[tokio::test]
async fn delete_returns_success_message() {
    let (app, state) = app().await;
    let vendor = state
        .vendors
        .create(common::vendor_payload("Prism Filaments"))
        .await
        .expect("vendor create failed");

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/api/vendors/{}", vendor.id))
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn dashboard_stats_reports_aggregates() {
    let (app, state) = app().await;
    seed_filament_with_stock(&state, dec!(1000), dec!(2)).await;
    state
        .orders
        .create(common::order_payload(dec!(1000), dec!(40)))
        .await
        .expect("order create failed");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/dashboard/stats")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["active_orders"], 1);
    let value: rust_decimal::Decimal = body["inventory_value"]
        .as_str()
        .expect("inventory_value missing")
        .parse()
        .expect("inventory_value not a decimal");
    assert_eq!(value, dec!(2000));
}

#[tokio::test]
async fn health_probe_reports_database_up() {
    let (app, _state) = app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["database"], "up");
}
