//! Category routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use guava_core::{ApiResponse, CategoryId};

use crate::error::AppError;
use crate::models::CategoryForm;
use crate::routes::{forms::FormData, parse_id};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list).post(create))
        .route("/categories/{id}", put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let categories = state.catalog().list_categories().await?;
    Ok(Json(ApiResponse::ok(categories)))
}

async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_form(multipart, &state).await?;
    let category = state.catalog().create_category(form).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let id: CategoryId = parse_id(&id, "Category")?;
    let form = read_form(multipart, &state).await?;
    let category = state.catalog().update_category(id, form).await?;
    Ok(Json(ApiResponse::ok(category)))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id: CategoryId = parse_id(&id, "Category")?;
    let category = state.catalog().delete_category(id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

async fn read_form(multipart: Multipart, state: &AppState) -> Result<CategoryForm, AppError> {
    let mut data = FormData::read(multipart, state.images()).await?;
    Ok(CategoryForm {
        name: data.take_text("name"),
        status: data.take_text("status"),
        image: data.take_file("image"),
    })
}
