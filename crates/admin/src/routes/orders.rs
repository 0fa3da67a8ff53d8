//! Order routes.
//!
//! Orders are append-only and listed newest-first. The path is `/addorder`
//! for both verbs, matching the admin frontend.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};

use guava_core::ApiResponse;

use crate::error::AppError;
use crate::models::NewOrder;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/addorder", get(list).post(create))
}

async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let orders = state.catalog().list_orders().await?;
    Ok(Json(ApiResponse::ok(orders)))
}

async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewOrder>,
) -> Result<impl IntoResponse, AppError> {
    let order = state.catalog().create_order(new).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(order))))
}
