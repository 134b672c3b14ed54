//! HTTP API tests for the customer service.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use customer_service::{CustomerState, build_router};
use reservations_testing::{fixtures, test_clock};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    reservations_testing::init_tracing();
    build_router(CustomerState::in_memory(Arc::new(test_clock())))
}

async fn post(app: &Router, body: &Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    app.clone().oneshot(request).await.expect("infallible")
}

async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.expect("infallible")
}

async fn json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_register_and_fetch() {
    let app = app();

    let response = post(&app, &fixtures::customer_json("Ada@Example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/1");
    let created = json(response).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["email"], "ada@example.com");

    let response = get(&app, "/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["name"], "Ada Lovelace");

    let response = get(&app, "/2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = app();
    let response = post(&app, &fixtures::customer_json("ada@example.com")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post(&app, &fixtures::customer_json("ADA@example.com ")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error = json(response).await;
    assert_eq!(error["code"], "RESOURCE_ALREADY_EXISTS");
    assert_eq!(
        error["message"],
        "Duplicated entry, the resource already exists."
    );

    // Exactly one customer was stored.
    assert_eq!(get(&app, "/1").await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/2").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_customer_is_validation_error() {
    let app = app();

    let response = post(&app, &json!({ "name": "  ", "email": "not-an-email" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error = json(response).await;
    let fields: Vec<_> = error["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["name", "email"]);

    let response = post(&app, &json!({ "name": "Ada" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json(response).await["fields"][0]["field"], "email");

    let response = post(&app, &json!({ "email": "not-an-email" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error = json(response).await;
    assert_eq!(error["fields"][0]["field"], "name");
    assert_eq!(error["fields"][1]["field"], "email");
}

#[tokio::test]
async fn test_invalid_id_is_validation_error() {
    let response = get(&app(), "/abc").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = app();
    assert_eq!(get(&app, "/health").await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/ready").await.status(), StatusCode::OK);
}
