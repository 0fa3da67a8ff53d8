//! End-to-end tests for the mutation event stream.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::Router;
use axum::body::{Body, BodyDataStream};
use axum::http::{Request, StatusCode};
use futures::StreamExt;
use tower::ServiceExt;

use guava_admin::broadcast::EventKind;
use guava_integration_tests::{MultipartBody, send, test_app};

/// Open the event stream and return its body as a chunk stream.
async fn open_stream(app: &Router) -> BodyDataStream {
    let request = Request::builder()
        .method("GET")
        .uri("/api/events")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );
    response.into_body().into_data_stream()
}

/// Read the next SSE frame, with a timeout so a broken stream fails the
/// test instead of hanging it.
async fn next_frame(stream: &mut BodyDataStream) -> String {
    let chunk = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("timed out waiting for event frame")
        .expect("stream ended")
        .expect("stream error");
    String::from_utf8(chunk.to_vec()).unwrap()
}

#[tokio::test]
async fn test_observer_is_welcomed_on_connect() {
    let (app, _state) = test_app().await;

    let mut stream = open_stream(&app).await;
    let frame = next_frame(&mut stream).await;
    assert!(frame.contains("event: welcome"));
    assert!(frame.contains("Welcome"));
}

#[tokio::test]
async fn test_mutation_reaches_connected_observer() {
    let (app, _state) = test_app().await;

    let mut stream = open_stream(&app).await;
    next_frame(&mut stream).await; // welcome

    let request = MultipartBody::new()
        .text("name", "Shoes")
        .into_request("POST", "/api/categories");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);

    let frame = next_frame(&mut stream).await;
    assert!(frame.contains("event: categoryUpdated"));
    assert!(frame.contains("Shoes"));
}

#[tokio::test]
async fn test_every_observer_sees_every_mutation() {
    let (app, _state) = test_app().await;

    let mut first = open_stream(&app).await;
    let mut second = open_stream(&app).await;
    next_frame(&mut first).await;
    next_frame(&mut second).await;

    let request = MultipartBody::new()
        .text("name", "Hats")
        .into_request("POST", "/api/categories");
    send(&app, request).await;

    assert!(next_frame(&mut first).await.contains("Hats"));
    assert!(next_frame(&mut second).await.contains("Hats"));
}

#[tokio::test]
async fn test_observer_receives_event_before_response_completes() {
    let (app, state) = test_app().await;
    let mut rx = state.broadcaster().subscribe();

    let request = MultipartBody::new()
        .text("name", "Shoes")
        .into_request("POST", "/api/categories");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);

    // Publication happened inside the request; the event is already
    // buffered by the time the response arrives, with the same payload.
    let event = rx.try_recv().unwrap();
    assert_eq!(event.kind, EventKind::CategoryUpdated);
    assert_eq!(event.data, body["data"]);
}

#[tokio::test]
async fn test_delete_publishes_deleted_event() {
    let (app, _state) = test_app().await;

    let request = MultipartBody::new()
        .text("name", "Shoes")
        .into_request("POST", "/api/categories");
    let (_, body) = send(&app, request).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let mut stream = open_stream(&app).await;
    next_frame(&mut stream).await;

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/categories/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);

    let frame = next_frame(&mut stream).await;
    assert!(frame.contains("event: categoryDeleted"));
    assert!(frame.contains(&id));
}
