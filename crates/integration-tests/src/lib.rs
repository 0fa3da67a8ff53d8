//! Integration test harness for the Guava admin backend.
//!
//! Drives the real router in-process against the in-memory store, so the
//! tests exercise the full HTTP surface (routing, extraction, validation,
//! envelopes, events) without a database or a listening socket.

#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use guava_admin::config::AdminConfig;
use guava_admin::state::AppState;
use guava_admin::store::MemoryStore;
use guava_admin::uploads::ImageStore;

/// Build the full application router backed by the in-memory store, with
/// uploads rooted in a per-test temporary directory.
pub async fn test_app() -> (Router, AppState) {
    let upload_dir = std::env::temp_dir().join(format!("guava-it-{}", Uuid::new_v4()));
    let images = ImageStore::new(upload_dir).await.expect("upload dir");
    let state = AppState::new(
        AdminConfig::default(),
        Arc::new(MemoryStore::new()),
        images,
    );
    (guava_admin::app(state.clone()), state)
}

/// Send a request and decode the response body.
///
/// Non-JSON bodies come back as a JSON string so assertions stay uniform.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, json)
}

/// GET request.
#[must_use]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

/// Request with a JSON body.
#[must_use]
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// Incrementally built `multipart/form-data` body.
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartBody {
    #[must_use]
    pub fn new() -> Self {
        Self {
            boundary: format!("guava-{}", Uuid::new_v4().simple()),
            body: Vec::new(),
        }
    }

    /// Append a text field.
    #[must_use]
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    /// Append a file field.
    #[must_use]
    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Finish the body and wrap it in a request.
    #[must_use]
    pub fn into_request(mut self, method: &str, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", self.boundary),
            )
            .body(Body::from(self.body))
            .expect("request")
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}
