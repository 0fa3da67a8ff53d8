//! Guava Admin - catalog administration backend.
//!
//! HTTP CRUD over the catalog entities (categories, subcategories,
//! products, orders, profiles, FAQs, contact messages) with image uploads
//! and a live event stream: every successful mutation is broadcast to all
//! connected observers as a server-sent event.
//!
//! The crate is a library so the full router can be driven in-process by
//! tests; the `guava-admin` binary wires it to `PostgreSQL` and serves it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod broadcast;
pub mod config;
pub mod error;
pub mod models;
pub mod resolve;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod uploads;

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use state::AppState;

/// Build the full application router around `state`.
///
/// Serves the API under `/api`, uploaded images under `/uploads`, and the
/// health endpoints at the root.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(state.config());
    let uploads = ServeDir::new(state.images().dir().to_path_buf());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", routes::api_router())
        .nest_service("/uploads", uploads)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

fn cors_layer(config: &config::AdminConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies store connectivity; returns 503 when the store is unreachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.catalog().ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
