//! Profile routes.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use guava_core::ApiResponse;

use crate::error::AppError;
use crate::models::ProfileForm;
use crate::routes::forms::FormData;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/profiles", get(list).post(create))
}

async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let profiles = state.catalog().list_profiles().await?;
    Ok(Json(ApiResponse::ok(profiles)))
}

async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut data = FormData::read(multipart, state.images()).await?;
    let form = ProfileForm {
        full_name: data.take_text("fullName"),
        email: data.take_text("email"),
        phone: data.take_text("phone"),
        password: data.take_text("password"),
        profile_picture: data.take_file("profilePicture"),
    };
    let profile = state.catalog().create_profile(form).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(profile))))
}
