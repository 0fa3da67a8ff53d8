//! FAQ routes.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};

use guava_core::ApiResponse;

use crate::error::AppError;
use crate::models::FaqDraft;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/faqs", get(list).post(create))
}

async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let faqs = state.catalog().list_faqs().await?;
    Ok(Json(ApiResponse::ok(faqs)))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<FaqDraft>,
) -> Result<impl IntoResponse, AppError> {
    let faq = state.catalog().create_faq(draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(faq))))
}
