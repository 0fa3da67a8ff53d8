//! Contact message routes.

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};

use guava_core::ApiResponse;

use crate::error::AppError;
use crate::models::ContactDraft;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/contacts", get(list).post(create))
}

async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let contacts = state.catalog().list_contacts().await?;
    Ok(Json(ApiResponse::ok(contacts)))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<ContactDraft>,
) -> Result<impl IntoResponse, AppError> {
    let contact = state.catalog().create_contact(draft).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(contact))))
}
