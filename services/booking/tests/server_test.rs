//! End-to-end test: real listener, real HTTP client.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use booking_service::{BookingState, build_router};
use reqwest::StatusCode;
use reservations_testing::{fixtures, test_clock};
use reservations_web::{CORRELATION_ID_HEADER, server};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[tokio::test]
async fn test_server_round_trip_and_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base = format!("http://{}", listener.local_addr().unwrap());
    let router = build_router(BookingState::in_memory(Arc::new(test_clock())));
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(server::serve_with_shutdown(
        listener,
        router,
        async {
            let _ = stop_rx.await;
        },
        Duration::from_secs(5),
    ));

    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/"))
        .json(&fixtures::booking_json(42))
        .send()
        .await
        .expect("create request");
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["location"], "/1");
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));

    let response = client
        .put(format!("{base}/1/status/CONFIRMED"))
        .send()
        .await
        .expect("status request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let booking: Value = client
        .get(format!("{base}/1"))
        .send()
        .await
        .expect("get request")
        .json()
        .await
        .expect("json body");
    assert_eq!(booking["status"], "CONFIRMED");
    assert_eq!(booking["resource"], "room-101");

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(10), server)
        .await
        .expect("server stops in time")
        .expect("server task");
    assert!(result.is_ok());
}
